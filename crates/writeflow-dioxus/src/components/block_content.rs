use std::sync::Arc;

use dioxus::prelude::*;
use writeflow_engine::model::Block;
use writeflow_engine::render::{Overrides, render_blocks};
use writeflow_engine::HtmlOptions;

use crate::catalog::DioxusCatalog;

/// Override map shared between renders. Props compare by pointer, so a
/// parent that keeps the same `Components` does not force a re-render.
#[derive(Clone, Debug)]
pub struct Components(Arc<Overrides<Element>>);

impl Components {
    pub fn overrides(&self) -> &Overrides<Element> {
        &self.0
    }
}

impl From<Overrides<Element>> for Components {
    fn from(overrides: Overrides<Element>) -> Self {
        Self(Arc::new(overrides))
    }
}

impl PartialEq for Components {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Renders a block list with the default catalog, replacing components for
/// the types present in `components`.
#[component]
pub fn BlockContent(
    blocks: Vec<Block>,
    components: Option<Components>,
    options: Option<HtmlOptions>,
) -> Element {
    let catalog = DioxusCatalog::new(options.unwrap_or_default());
    let overrides = components.as_ref().map(Components::overrides);

    match render_blocks(&blocks, &catalog, overrides) {
        Ok(nodes) => rsx! {
            for node in nodes {
                {node}
            }
        },
        Err(err) => {
            log::error!("Failed to render {} blocks: {err}", blocks.len());
            rsx! {
                div { class: "render-error", "{err}" }
            }
        }
    }
}
