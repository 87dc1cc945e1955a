//! Block rendering engine for Writeflow content.
//!
//! A content tree (Notion blocks plus Writeflow extensions) is decoded into
//! [`model::Block`]s and rendered through a [`render::Catalog`] of default
//! components, optionally with per-type [`render::Overrides`]. The
//! [`html::HtmlCatalog`] renders to HTML strings; other hosts live in their
//! own crates.

pub mod html;
pub mod model;
pub mod render;

pub use html::{Html, HtmlCatalog, HtmlOptions};
pub use model::{Block, BlockData, BlockType, Document, RichTextItem};
pub use render::{Catalog, Overrides, RenderError, RenderResult, render_blocks};
