use log::{debug, trace};

use crate::model::{Block, BlockData, BlockType, RichTextItem};

use super::catalog::{BlockContext, Catalog, ListKind};
use super::error::RenderResult;
use super::overrides::{Override, Overrides};

/// Tree walk turning blocks into host nodes.
///
/// A `Renderer` borrows its catalog and overrides and keeps no state between
/// calls, so one instance can render any number of trees.
pub struct Renderer<'r, C: Catalog> {
    catalog: &'r C,
    overrides: Option<&'r Overrides<C::Node>>,
}

impl<'r, C: Catalog> Renderer<'r, C> {
    pub fn new(catalog: &'r C) -> Self {
        Self {
            catalog,
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: &'r Overrides<C::Node>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Render a sibling sequence.
    ///
    /// Output order follows input order. Each maximal run of same-kind list
    /// items becomes one list container at the position of the run's last
    /// item; every other block becomes exactly one node.
    pub fn render(&self, blocks: &[Block]) -> RenderResult<Vec<C::Node>> {
        let mut output = Vec::with_capacity(blocks.len());
        let mut pending = Vec::new();

        for (idx, block) in blocks.iter().enumerate() {
            let Some(kind) = block.block_type().and_then(ListKind::of) else {
                output.push(self.render_block(block)?);
                continue;
            };

            pending.push(self.render_block(block)?);

            let run_continues = blocks
                .get(idx + 1)
                .is_some_and(|next| next.block_type() == Some(kind.item_type()));
            if !run_continues {
                output.push(self.render_list(kind, std::mem::take(&mut pending))?);
            }
        }

        Ok(output)
    }

    fn render_block(&self, block: &Block) -> RenderResult<C::Node> {
        // Rows are rendered from their cells alone.
        let children = match (block.block_type(), &block.children) {
            (Some(BlockType::TableRow), _) | (_, None) => None,
            (_, Some(children)) => Some(self.render(children)?),
        };
        self.resolve(block, children)
    }

    /// Pick the override for the block's type if there is one, else the
    /// catalog default. Unknown discriminants resolve as `unsupported`.
    fn resolve(&self, block: &Block, children: Option<Vec<C::Node>>) -> RenderResult<C::Node> {
        let ty = block.block_type().unwrap_or_else(|| {
            debug!(
                "No component for block type {:?} (block {}), rendering as unsupported",
                block.type_name(),
                block.id
            );
            BlockType::Unsupported
        });

        match self.overrides.and_then(|map| map.get(ty)) {
            Some(Override::Leaf(component)) => {
                trace!("Override {ty} for block {}", block.id);
                component(block)
            }
            Some(Override::Container(component)) => {
                trace!("Override {ty} for block {}", block.id);
                component(block, children)
            }
            None => self.render_default(block, children),
        }
    }

    fn render_list(&self, kind: ListKind, items: Vec<C::Node>) -> RenderResult<C::Node> {
        match self.overrides.and_then(|map| map.get_list(kind)) {
            Some(component) => {
                trace!(
                    "Override {} with {} items",
                    kind.container_name(),
                    items.len()
                );
                component(items)
            }
            None => self.catalog.list(kind, items),
        }
    }

    fn rich_text(&self, items: &[RichTextItem]) -> RenderResult<C::Node> {
        match self.overrides.and_then(Overrides::get_rich_text) {
            Some(component) => component(items),
            None => self.catalog.rich_text(items),
        }
    }

    fn render_default(
        &self,
        block: &Block,
        children: Option<Vec<C::Node>>,
    ) -> RenderResult<C::Node> {
        let rich_text = |items: &[RichTextItem]| self.rich_text(items);
        let cx = BlockContext::new(block, &rich_text);
        let catalog = self.catalog;

        match &block.data {
            BlockData::Paragraph(p) => catalog.paragraph(&cx, p, children),
            BlockData::Heading1(h) => catalog.heading(&cx, 1, h, children),
            BlockData::Heading2(h) => catalog.heading(&cx, 2, h, children),
            BlockData::Heading3(h) => catalog.heading(&cx, 3, h, children),
            BlockData::BulletedListItem(item) => {
                catalog.list_item(&cx, ListKind::Bulleted, item, children)
            }
            BlockData::NumberedListItem(item) => {
                catalog.list_item(&cx, ListKind::Numbered, item, children)
            }
            BlockData::ToDo(t) => catalog.to_do(&cx, t, children),
            BlockData::Toggle(t) => catalog.toggle(&cx, t, children),
            BlockData::Quote(q) => catalog.quote(&cx, q, children),
            BlockData::Callout(c) => catalog.callout(&cx, c, children),
            BlockData::Code(c) => catalog.code(&cx, c),
            BlockData::Table(t) => catalog.table(&cx, t, children),
            BlockData::TableRow(row) => catalog.table_row(&cx, row),
            BlockData::ColumnList => catalog.column_list(&cx, children),
            BlockData::Column => catalog.column(&cx, children),
            BlockData::Divider => catalog.divider(&cx),
            BlockData::Image(m) => catalog.image(&cx, m),
            BlockData::Video(m) => catalog.video(&cx, m),
            BlockData::Audio(m) => catalog.audio(&cx, m),
            BlockData::File(m) => catalog.file(&cx, m),
            BlockData::Pdf(m) => catalog.pdf(&cx, m),
            BlockData::Embed(e) => catalog.embed(&cx, e),
            BlockData::Bookmark(b) => catalog.bookmark(&cx, b),
            BlockData::Equation(e) => catalog.equation(&cx, e),
            BlockData::LinkPreview(l) => catalog.link_preview(&cx, l),
            BlockData::LinkToPage(l) => catalog.link_to_page(&cx, l),
            BlockData::LinkToContent(l) => catalog.link_to_content(&cx, l),
            BlockData::ChildPage(t) => catalog.child_page(&cx, t, children),
            BlockData::ChildDatabase(t) => catalog.child_database(&cx, t, children),
            BlockData::SyncedBlock(s) => catalog.synced_block(&cx, s, children),
            BlockData::TableOfContents => catalog.table_of_contents(&cx),
            BlockData::Template(t) => catalog.template(&cx, t),
            BlockData::Breadcrumb => catalog.breadcrumb(&cx),
            BlockData::Mention => catalog.mention(&cx),
            BlockData::Unsupported | BlockData::Unknown { .. } => catalog.unsupported(&cx),
        }
    }
}

/// Render `blocks` with `catalog` defaults and optional `overrides`.
pub fn render_blocks<C: Catalog>(
    blocks: &[Block],
    catalog: &C,
    overrides: Option<&Overrides<C::Node>>,
) -> RenderResult<Vec<C::Node>> {
    let renderer = Renderer::new(catalog);
    match overrides {
        Some(overrides) => renderer.with_overrides(overrides).render(blocks),
        None => renderer.render(blocks),
    }
}
