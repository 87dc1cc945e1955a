use crate::model::{
    Block, BlockType, BookmarkBlock, CalloutBlock, CodeBlock, EmbedBlock, EquationBlock,
    HeadingBlock, LinkPreviewBlock, LinkToContentBlock, LinkToPageBlock, Mark, MediaBlock,
    RichTextItem, SyncedBlock, TableBlock, TableRowBlock, TextBlock, TitleBlock, ToDoBlock,
};

use super::error::RenderResult;
use super::rich_text::format_rich_text;

/// The two list kinds whose consecutive items are folded into one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    pub fn of(ty: BlockType) -> Option<Self> {
        match ty {
            BlockType::BulletedListItem => Some(ListKind::Bulleted),
            BlockType::NumberedListItem => Some(ListKind::Numbered),
            _ => None,
        }
    }

    pub fn item_type(self) -> BlockType {
        match self {
            ListKind::Bulleted => BlockType::BulletedListItem,
            ListKind::Numbered => BlockType::NumberedListItem,
        }
    }

    /// Name of the implicit container component (`bulleted_list` / `numbered_list`).
    pub fn container_name(self) -> &'static str {
        match self {
            ListKind::Bulleted => "bulleted_list",
            ListKind::Numbered => "numbered_list",
        }
    }
}

/// Inline primitives a host must provide for rich text formatting.
pub trait InlineHost {
    /// Opaque node type of the host UI. The engine only constructs and moves these.
    type Node;

    fn text(&self, text: &str) -> Self::Node;
    fn mark(&self, mark: Mark, inner: Self::Node) -> Self::Node;
    fn link(&self, href: &str, inner: Self::Node) -> Self::Node;
    fn concat(&self, nodes: Vec<Self::Node>) -> Self::Node;
}

/// What a default component may see besides its payload: its own block and
/// the rich text renderer in effect for this render call.
pub struct BlockContext<'a, N> {
    block: &'a Block,
    rich_text: &'a dyn Fn(&[RichTextItem]) -> RenderResult<N>,
}

impl<'a, N> BlockContext<'a, N> {
    pub fn new(
        block: &'a Block,
        rich_text: &'a dyn Fn(&[RichTextItem]) -> RenderResult<N>,
    ) -> Self {
        Self { block, rich_text }
    }

    pub fn block(&self) -> &'a Block {
        self.block
    }

    pub fn id(&self) -> &'a str {
        &self.block.id
    }

    /// Render inline text, through the rich text override when one is registered.
    pub fn rich_text(&self, items: &[RichTextItem]) -> RenderResult<N> {
        (self.rich_text)(items)
    }
}

/// Total set of default components for one host node type.
///
/// Every block type has a method, so a catalog can always render any block;
/// overrides only ever replace entries, they never fill gaps. Methods for
/// container-capable types receive the already rendered `children`
/// (`None` when the block has none, `Some` and possibly empty otherwise).
pub trait Catalog: InlineHost {
    /// Default inline formatting; see [`format_rich_text`].
    fn rich_text(&self, items: &[RichTextItem]) -> RenderResult<Self::Node> {
        Ok(format_rich_text(self, items))
    }

    fn list(&self, kind: ListKind, items: Vec<Self::Node>) -> RenderResult<Self::Node>;

    fn list_item(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        kind: ListKind,
        item: &TextBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn paragraph(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        paragraph: &TextBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    /// `level` is 1, 2 or 3.
    fn heading(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        level: u8,
        heading: &HeadingBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn to_do(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        to_do: &ToDoBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn toggle(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        toggle: &TextBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn quote(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        quote: &TextBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn callout(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        callout: &CalloutBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn code(&self, cx: &BlockContext<'_, Self::Node>, code: &CodeBlock) -> RenderResult<Self::Node>;

    fn table(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        table: &TableBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn table_row(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        row: &TableRowBlock,
    ) -> RenderResult<Self::Node>;

    fn column_list(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn column(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn divider(&self, cx: &BlockContext<'_, Self::Node>) -> RenderResult<Self::Node>;

    fn image(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        image: &MediaBlock,
    ) -> RenderResult<Self::Node>;

    fn video(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        video: &MediaBlock,
    ) -> RenderResult<Self::Node>;

    fn audio(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        audio: &MediaBlock,
    ) -> RenderResult<Self::Node>;

    fn file(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        file: &MediaBlock,
    ) -> RenderResult<Self::Node>;

    fn pdf(&self, cx: &BlockContext<'_, Self::Node>, pdf: &MediaBlock) -> RenderResult<Self::Node>;

    fn embed(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        embed: &EmbedBlock,
    ) -> RenderResult<Self::Node>;

    fn bookmark(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        bookmark: &BookmarkBlock,
    ) -> RenderResult<Self::Node>;

    fn link_preview(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        preview: &LinkPreviewBlock,
    ) -> RenderResult<Self::Node>;

    fn equation(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        equation: &EquationBlock,
    ) -> RenderResult<Self::Node>;

    fn link_to_page(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        link: &LinkToPageBlock,
    ) -> RenderResult<Self::Node>;

    fn link_to_content(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        link: &LinkToContentBlock,
    ) -> RenderResult<Self::Node>;

    fn child_page(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        page: &TitleBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn child_database(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        database: &TitleBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn synced_block(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        synced: &SyncedBlock,
        children: Option<Vec<Self::Node>>,
    ) -> RenderResult<Self::Node>;

    fn template(
        &self,
        cx: &BlockContext<'_, Self::Node>,
        template: &TextBlock,
    ) -> RenderResult<Self::Node>;

    // Notion exposes no renderable payload for these three; they share the
    // placeholder unless a catalog has something better to show.

    fn table_of_contents(&self, cx: &BlockContext<'_, Self::Node>) -> RenderResult<Self::Node> {
        self.unsupported(cx)
    }

    fn breadcrumb(&self, cx: &BlockContext<'_, Self::Node>) -> RenderResult<Self::Node> {
        self.unsupported(cx)
    }

    fn mention(&self, cx: &BlockContext<'_, Self::Node>) -> RenderResult<Self::Node> {
        self.unsupported(cx)
    }

    /// Placeholder for `unsupported` blocks and for discriminants this crate
    /// does not know (`cx.block().type_name()` tells them apart).
    fn unsupported(&self, cx: &BlockContext<'_, Self::Node>) -> RenderResult<Self::Node>;
}
