use serde::{Deserialize, Serialize};

/// One run of inline text inside a block payload.
///
/// Only the fields the renderer reads are modelled; the rest of the Notion
/// rich text object (`type`, `text`, `mention`, colors) is ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Independent formatting flags of a rich text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// A visual decoration applied around a run of text.
///
/// Variant order is the nesting order used when formatting: `Code` wraps the
/// text first and `Bold` ends up outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    Code,
    Underline,
    Strikethrough,
    Italic,
    Bold,
}

impl Mark {
    pub const NESTING_ORDER: [Mark; 5] = [
        Mark::Code,
        Mark::Underline,
        Mark::Strikethrough,
        Mark::Italic,
        Mark::Bold,
    ];
}

impl Annotations {
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Code => self.code,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
            Mark::Italic => self.italic,
            Mark::Bold => self.bold,
        }
    }

    /// Active marks, innermost first.
    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        Mark::NESTING_ORDER
            .into_iter()
            .filter(move |mark| self.has(*mark))
    }
}

impl RichTextItem {
    /// Unformatted text with no link.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        match mark {
            Mark::Code => self.annotations.code = true,
            Mark::Underline => self.annotations.underline = true,
            Mark::Strikethrough => self.annotations.strikethrough = true,
            Mark::Italic => self.annotations.italic = true,
            Mark::Bold => self.annotations.bold = true,
        }
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Concatenated plain text of a rich text sequence (used for captions and alt text).
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
