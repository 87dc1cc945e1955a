//! # Rendering
//!
//! Turns a block tree into host nodes.
//!
//! - **`catalog`**: the `Catalog` trait every host implements, one method per block type
//! - **`overrides`**: caller-supplied components that replace catalog entries
//! - **`renderer`**: the tree walk, list grouping and component lookup
//! - **`rich_text`**: default inline formatting of annotated text runs
//!
//! The engine is host agnostic: it never inspects a node, it only passes
//! nodes produced by one component into the next.

pub mod catalog;
pub mod error;
pub mod overrides;
pub mod renderer;
pub mod rich_text;

pub use catalog::{BlockContext, Catalog, InlineHost, ListKind};
pub use error::{RenderError, RenderResult};
pub use overrides::{ContainerFn, LeafFn, ListFn, Override, Overrides, RichTextFn};
pub use renderer::{Renderer, render_blocks};
pub use rich_text::format_rich_text;
