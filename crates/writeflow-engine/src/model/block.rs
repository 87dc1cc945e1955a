use serde::{Deserialize, Serialize};
use std::fmt;

use super::rich_text::RichTextItem;

/// One node of the content tree.
///
/// `children` distinguishes "no nested blocks" (`None`) from "nested blocks
/// present but empty" (`Some(vec![])`); the renderer passes that distinction
/// through to components unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Stable identifier, unique among siblings.
    pub id: String,
    pub data: BlockData,
    pub children: Option<Vec<Block>>,
}

impl Block {
    pub fn new(id: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: id.into(),
            data,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = Some(children);
        self
    }

    /// Known discriminant, or `None` for a type added after this crate was built.
    pub fn block_type(&self) -> Option<BlockType> {
        self.data.block_type()
    }

    /// Wire name of the discriminant, including unknown ones.
    pub fn type_name(&self) -> &str {
        match &self.data {
            BlockData::Unknown { block_type, .. } => block_type.as_str(),
            data => data.block_type().map(BlockType::as_str).unwrap_or_default(),
        }
    }
}

/// Type-specific payload of a block, tagged by its discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Paragraph(TextBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList,
    Column,
    Divider,
    Image(MediaBlock),
    Video(MediaBlock),
    Audio(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Embed(EmbedBlock),
    Bookmark(BookmarkBlock),
    Equation(EquationBlock),
    LinkPreview(LinkPreviewBlock),
    LinkToPage(LinkToPageBlock),
    LinkToContent(LinkToContentBlock),
    ChildPage(TitleBlock),
    ChildDatabase(TitleBlock),
    SyncedBlock(SyncedBlock),
    TableOfContents,
    Template(TextBlock),
    Breadcrumb,
    Mention,
    Unsupported,
    /// A discriminant this crate does not know. The raw payload is kept so
    /// the block encodes back unchanged.
    Unknown {
        block_type: String,
        payload: serde_json::Value,
    },
}

impl BlockData {
    pub fn block_type(&self) -> Option<BlockType> {
        let ty = match self {
            BlockData::Paragraph(_) => BlockType::Paragraph,
            BlockData::Heading1(_) => BlockType::Heading1,
            BlockData::Heading2(_) => BlockType::Heading2,
            BlockData::Heading3(_) => BlockType::Heading3,
            BlockData::BulletedListItem(_) => BlockType::BulletedListItem,
            BlockData::NumberedListItem(_) => BlockType::NumberedListItem,
            BlockData::ToDo(_) => BlockType::ToDo,
            BlockData::Toggle(_) => BlockType::Toggle,
            BlockData::Quote(_) => BlockType::Quote,
            BlockData::Callout(_) => BlockType::Callout,
            BlockData::Code(_) => BlockType::Code,
            BlockData::Table(_) => BlockType::Table,
            BlockData::TableRow(_) => BlockType::TableRow,
            BlockData::ColumnList => BlockType::ColumnList,
            BlockData::Column => BlockType::Column,
            BlockData::Divider => BlockType::Divider,
            BlockData::Image(_) => BlockType::Image,
            BlockData::Video(_) => BlockType::Video,
            BlockData::Audio(_) => BlockType::Audio,
            BlockData::File(_) => BlockType::File,
            BlockData::Pdf(_) => BlockType::Pdf,
            BlockData::Embed(_) => BlockType::Embed,
            BlockData::Bookmark(_) => BlockType::Bookmark,
            BlockData::Equation(_) => BlockType::Equation,
            BlockData::LinkPreview(_) => BlockType::LinkPreview,
            BlockData::LinkToPage(_) => BlockType::LinkToPage,
            BlockData::LinkToContent(_) => BlockType::LinkToContent,
            BlockData::ChildPage(_) => BlockType::ChildPage,
            BlockData::ChildDatabase(_) => BlockType::ChildDatabase,
            BlockData::SyncedBlock(_) => BlockType::SyncedBlock,
            BlockData::TableOfContents => BlockType::TableOfContents,
            BlockData::Template(_) => BlockType::Template,
            BlockData::Breadcrumb => BlockType::Breadcrumb,
            BlockData::Mention => BlockType::Mention,
            BlockData::Unsupported => BlockType::Unsupported,
            BlockData::Unknown { .. } => return None,
        };
        Some(ty)
    }
}

/// Field-less discriminant of every block type known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Table,
    TableRow,
    ColumnList,
    Column,
    Divider,
    Image,
    Video,
    Audio,
    File,
    Pdf,
    Embed,
    Bookmark,
    Equation,
    LinkPreview,
    LinkToPage,
    LinkToContent,
    ChildPage,
    ChildDatabase,
    SyncedBlock,
    TableOfContents,
    Template,
    Breadcrumb,
    Mention,
    Unsupported,
}

impl BlockType {
    pub const ALL: &'static [BlockType] = &[
        BlockType::Paragraph,
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::BulletedListItem,
        BlockType::NumberedListItem,
        BlockType::ToDo,
        BlockType::Toggle,
        BlockType::Quote,
        BlockType::Callout,
        BlockType::Code,
        BlockType::Table,
        BlockType::TableRow,
        BlockType::ColumnList,
        BlockType::Column,
        BlockType::Divider,
        BlockType::Image,
        BlockType::Video,
        BlockType::Audio,
        BlockType::File,
        BlockType::Pdf,
        BlockType::Embed,
        BlockType::Bookmark,
        BlockType::Equation,
        BlockType::LinkPreview,
        BlockType::LinkToPage,
        BlockType::LinkToContent,
        BlockType::ChildPage,
        BlockType::ChildDatabase,
        BlockType::SyncedBlock,
        BlockType::TableOfContents,
        BlockType::Template,
        BlockType::Breadcrumb,
        BlockType::Mention,
        BlockType::Unsupported,
    ];

    /// Wire name used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ToDo => "to_do",
            BlockType::Toggle => "toggle",
            BlockType::Quote => "quote",
            BlockType::Callout => "callout",
            BlockType::Code => "code",
            BlockType::Table => "table",
            BlockType::TableRow => "table_row",
            BlockType::ColumnList => "column_list",
            BlockType::Column => "column",
            BlockType::Divider => "divider",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Audio => "audio",
            BlockType::File => "file",
            BlockType::Pdf => "pdf",
            BlockType::Embed => "embed",
            BlockType::Bookmark => "bookmark",
            BlockType::Equation => "equation",
            BlockType::LinkPreview => "link_preview",
            BlockType::LinkToPage => "link_to_page",
            BlockType::LinkToContent => "link_to_content",
            BlockType::ChildPage => "child_page",
            BlockType::ChildDatabase => "child_database",
            BlockType::SyncedBlock => "synced_block",
            BlockType::TableOfContents => "table_of_contents",
            BlockType::Template => "template",
            BlockType::Breadcrumb => "breadcrumb",
            BlockType::Mention => "mention",
            BlockType::Unsupported => "unsupported",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.as_str() == name)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of blocks that carry only inline text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
    /// Icon kinds without a glyph (custom emoji and the like).
    #[serde(other)]
    Other,
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji { emoji } => Some(emoji),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Notion-hosted file; the URL is signed and expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// Where a media block's bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    File { file: HostedFile },
    External { external: ExternalFile },
}

impl FileSource {
    pub fn url(&self) -> &str {
        match self {
            FileSource::File { file } => &file.url,
            FileSource::External { external } => &external.url,
        }
    }
}

/// Payload shared by image, video, audio, file and pdf blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBlock {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MediaBlock {
    pub fn url(&self) -> &str {
        self.source.url()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedBlock {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkBlock {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreviewBlock {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkToPageBlock {
    PageId { page_id: String },
    DatabaseId { database_id: String },
    #[serde(other)]
    Other,
}

impl LinkToPageBlock {
    pub fn target_id(&self) -> Option<&str> {
        match self {
            LinkToPageBlock::PageId { page_id } => Some(page_id),
            LinkToPageBlock::DatabaseId { database_id } => Some(database_id),
            LinkToPageBlock::Other => None,
        }
    }
}

/// Writeflow extension: a reference to another published content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkToContentBlock {
    pub content_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Payload of child_page and child_database blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleBlock {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncedBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: String,
}
