//! # Block Model
//!
//! Typed representation of the content tree exported by Writeflow (Notion
//! blocks plus Writeflow extensions).
//!
//! - **`block`**: `Block`, the `BlockData` payload union and the `BlockType` discriminant
//! - **`rich_text`**: inline text runs with their annotation flags
//! - **`wire`**: JSON encoding of blocks in the Notion wire form
//! - **`document`**: the content envelope a block tree arrives in

pub mod block;
pub mod document;
pub mod rich_text;
mod wire;

pub use block::*;
pub use document::{Content, Document, DocumentError};
pub use rich_text::{Annotations, Mark, RichTextItem, plain_text};
