//! Dioxus host for the Writeflow block renderer.
//!
//! [`DioxusCatalog`] renders every block type as `rsx!` elements, and the
//! [`BlockContent`](components::BlockContent) component renders a block list
//! with optional per-type overrides.

pub mod catalog;
pub mod components;

pub use catalog::DioxusCatalog;
pub use components::{BlockContent, BlockContentProps, Components};
