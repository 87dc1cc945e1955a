use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{Block, BlockType, RichTextItem};

use super::catalog::ListKind;
use super::error::RenderResult;

pub type LeafFn<N> = Arc<dyn Fn(&Block) -> RenderResult<N> + Send + Sync>;
pub type ContainerFn<N> = Arc<dyn Fn(&Block, Option<Vec<N>>) -> RenderResult<N> + Send + Sync>;
pub type ListFn<N> = Arc<dyn Fn(Vec<N>) -> RenderResult<N> + Send + Sync>;
pub type RichTextFn<N> = Arc<dyn Fn(&[RichTextItem]) -> RenderResult<N> + Send + Sync>;

/// A caller-supplied component for one block type.
pub enum Override<N> {
    /// Receives `{block}` only.
    Leaf(LeafFn<N>),
    /// Receives `{block, children}`. Children are `None` when the block has
    /// none, and always `None` for `table_row`.
    Container(ContainerFn<N>),
}

impl<N> Clone for Override<N> {
    fn clone(&self) -> Self {
        match self {
            Override::Leaf(f) => Override::Leaf(Arc::clone(f)),
            Override::Container(f) => Override::Container(Arc::clone(f)),
        }
    }
}

/// Partial component map layered over a catalog.
///
/// Any entry present here wins over the catalog default for its block type,
/// for every block of that type in the render call. Entries absent here fall
/// back to the catalog; there is no further level.
pub struct Overrides<N> {
    blocks: HashMap<BlockType, Override<N>>,
    lists: HashMap<ListKind, ListFn<N>>,
    rich_text: Option<RichTextFn<N>>,
}

impl<N> Overrides<N> {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            lists: HashMap::new(),
            rich_text: None,
        }
    }

    /// Register a component that sees only the block.
    pub fn leaf<F>(mut self, ty: BlockType, component: F) -> Self
    where
        F: Fn(&Block) -> RenderResult<N> + Send + Sync + 'static,
    {
        self.blocks.insert(ty, Override::Leaf(Arc::new(component)));
        self
    }

    /// Register a component that sees the block and its rendered children.
    pub fn container<F>(mut self, ty: BlockType, component: F) -> Self
    where
        F: Fn(&Block, Option<Vec<N>>) -> RenderResult<N> + Send + Sync + 'static,
    {
        let entry = Override::Container(Arc::new(component));
        self.blocks.insert(ty, entry);
        self
    }

    /// Register the container wrapping a run of list items.
    pub fn list<F>(mut self, kind: ListKind, component: F) -> Self
    where
        F: Fn(Vec<N>) -> RenderResult<N> + Send + Sync + 'static,
    {
        self.lists.insert(kind, Arc::new(component));
        self
    }

    /// Replace inline formatting. The component receives a whole rich text
    /// sequence, and catalog components use it wherever they render text.
    pub fn rich_text<F>(mut self, component: F) -> Self
    where
        F: Fn(&[RichTextItem]) -> RenderResult<N> + Send + Sync + 'static,
    {
        self.rich_text = Some(Arc::new(component));
        self
    }

    pub fn get(&self, ty: BlockType) -> Option<&Override<N>> {
        self.blocks.get(&ty)
    }

    pub fn get_list(&self, kind: ListKind) -> Option<&ListFn<N>> {
        self.lists.get(&kind)
    }

    pub fn get_rich_text(&self) -> Option<&RichTextFn<N>> {
        self.rich_text.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.lists.is_empty() && self.rich_text.is_none()
    }
}

impl<N> Default for Overrides<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for Overrides<N> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            lists: self.lists.clone(),
            rich_text: self.rich_text.clone(),
        }
    }
}

impl<N> fmt::Debug for Overrides<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks: Vec<_> = self.blocks.keys().map(|ty| ty.as_str()).collect();
        blocks.sort_unstable();
        let mut lists: Vec<_> = self.lists.keys().map(|k| k.container_name()).collect();
        lists.sort_unstable();
        f.debug_struct("Overrides")
            .field("blocks", &blocks)
            .field("lists", &lists)
            .field("rich_text", &self.rich_text.is_some())
            .finish()
    }
}
