use serde::{Deserialize, Serialize};

use super::block::Block;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid block JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content entry has no body")]
    MissingBody,
}

/// A published content entry as returned by the Writeflow API.
///
/// The API only returns the fields that were selected, so every field is
/// optional here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Block>>,
}

/// Block tree ready for rendering, with the title of its content entry if known.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Parse either a bare `Block[]` or a content entry carrying a `body`.
    ///
    /// Nesting is bounded by serde_json's recursion limit of 128 levels. Each
    /// block level takes two (the block object and its `children` array), so
    /// trees more than about 60 blocks deep fail with
    /// [`DocumentError::Json`] instead of exhausting the stack.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let blocks: Vec<Block> = serde_json::from_value(value)?;
            return Ok(Self {
                title: None,
                blocks,
            });
        }

        let content: Content = serde_json::from_value(value)?;
        Self::try_from(content)
    }
}

impl TryFrom<Content> for Document {
    type Error = DocumentError;

    fn try_from(content: Content) -> Result<Self, Self::Error> {
        let blocks = content.body.ok_or(DocumentError::MissingBody)?;
        Ok(Self {
            title: content.title,
            blocks,
        })
    }
}
