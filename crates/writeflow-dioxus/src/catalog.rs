use dioxus::prelude::*;
use writeflow_engine::HtmlOptions;
use writeflow_engine::model::{
    BookmarkBlock, CalloutBlock, CodeBlock, EmbedBlock, EquationBlock, HeadingBlock,
    LinkPreviewBlock, LinkToContentBlock, LinkToPageBlock, Mark, MediaBlock, SyncedBlock,
    TableBlock, TableRowBlock, TextBlock, TitleBlock, ToDoBlock, plain_text,
};
use writeflow_engine::render::{BlockContext, Catalog, InlineHost, ListKind, RenderResult};

type Children = Option<Vec<Element>>;

/// Default components as Dioxus elements. Markup matches `HtmlCatalog`.
///
/// Each block's root element is keyed by the block id, so lists of blocks
/// diff by identity rather than position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DioxusCatalog {
    options: HtmlOptions,
}

impl DioxusCatalog {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    fn indented(&self, children: Children) -> Element {
        let indent = self.options.child_indent_px;
        match children {
            Some(children) if !children.is_empty() => rsx! {
                div {
                    style: "margin-left: {indent}px",
                    for child in children {
                        {child}
                    }
                }
            },
            _ => rsx! {},
        }
    }
}

fn fragment(children: Children) -> Element {
    let children = children.unwrap_or_default();
    rsx! {
        for child in children {
            {child}
        }
    }
}

impl InlineHost for DioxusCatalog {
    type Node = Element;

    fn text(&self, text: &str) -> Element {
        rsx! { "{text}" }
    }

    fn mark(&self, mark: Mark, inner: Element) -> Element {
        match mark {
            Mark::Code => rsx! { code { {inner} } },
            Mark::Underline => rsx! { u { {inner} } },
            Mark::Strikethrough => rsx! { s { {inner} } },
            Mark::Italic => rsx! { i { {inner} } },
            Mark::Bold => rsx! { b { {inner} } },
        }
    }

    fn link(&self, href: &str, inner: Element) -> Element {
        rsx! { a { href: "{href}", {inner} } }
    }

    fn concat(&self, nodes: Vec<Element>) -> Element {
        rsx! {
            for node in nodes {
                {node}
            }
        }
    }
}

impl Catalog for DioxusCatalog {
    fn list(&self, kind: ListKind, items: Vec<Element>) -> RenderResult<Element> {
        Ok(match kind {
            ListKind::Bulleted => rsx! {
                ul {
                    for item in items {
                        {item}
                    }
                }
            },
            ListKind::Numbered => rsx! {
                ol {
                    for item in items {
                        {item}
                    }
                }
            },
        })
    }

    fn list_item(
        &self,
        cx: &BlockContext<'_, Element>,
        _kind: ListKind,
        item: &TextBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let content = cx.rich_text(&item.rich_text)?;
        let nested = self.indented(children);
        Ok(rsx! {
            li { key: "{id}",
                {content}
                {nested}
            }
        })
    }

    fn paragraph(
        &self,
        cx: &BlockContext<'_, Element>,
        paragraph: &TextBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let content = cx.rich_text(&paragraph.rich_text)?;
        let nested = self.indented(children);
        Ok(rsx! {
            p { key: "{id}", {content} }
            {nested}
        })
    }

    fn heading(
        &self,
        cx: &BlockContext<'_, Element>,
        level: u8,
        heading: &HeadingBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let content = cx.rich_text(&heading.rich_text)?;
        let title = match level {
            1 => rsx! { h1 { key: "{id}", {content} } },
            2 => rsx! { h2 { key: "{id}", {content} } },
            _ => rsx! { h3 { key: "{id}", {content} } },
        };
        if !heading.is_toggleable {
            return Ok(title);
        }
        let body = fragment(children);
        Ok(rsx! {
            details { key: "{id}",
                summary { {title} }
                {body}
            }
        })
    }

    fn to_do(
        &self,
        cx: &BlockContext<'_, Element>,
        to_do: &ToDoBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id().to_string();
        let checked = to_do.checked;
        let label = cx.rich_text(&to_do.rich_text)?;
        let body = fragment(children);
        Ok(rsx! {
            div { key: "{id}",
                input {
                    id: "{id}",
                    r#type: "checkbox",
                    checked,
                    disabled: true,
                }
                label { r#for: "{id}", {label} }
                {body}
            }
        })
    }

    fn toggle(
        &self,
        cx: &BlockContext<'_, Element>,
        toggle: &TextBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let summary = cx.rich_text(&toggle.rich_text)?;
        let body = fragment(children);
        Ok(rsx! {
            details { key: "{id}",
                summary { {summary} }
                {body}
            }
        })
    }

    fn quote(
        &self,
        cx: &BlockContext<'_, Element>,
        quote: &TextBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let content = cx.rich_text(&quote.rich_text)?;
        let body = fragment(children);
        Ok(rsx! {
            blockquote {
                key: "{id}",
                style: "border-left: 4px solid black; padding-left: 8px",
                {content}
                {body}
            }
        })
    }

    fn callout(
        &self,
        cx: &BlockContext<'_, Element>,
        callout: &CalloutBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let icon = callout
            .icon
            .as_ref()
            .and_then(|icon| icon.emoji())
            .unwrap_or(self.options.callout_placeholder.as_str())
            .to_string();
        let id = cx.id();
        let content = cx.rich_text(&callout.rich_text)?;
        let nested = self.indented(children);
        Ok(rsx! {
            div { key: "{id}",
                span { "{icon}" }
                {content}
                {nested}
            }
        })
    }

    fn code(&self, cx: &BlockContext<'_, Element>, code: &CodeBlock) -> RenderResult<Element> {
        let id = cx.id();
        let code_class = code
            .language
            .as_ref()
            .map(|lang| format!("language-{lang}"));
        let content = cx.rich_text(&code.rich_text)?;
        Ok(rsx! {
            pre { key: "{id}",
                code { class: code_class, {content} }
            }
        })
    }

    fn table(
        &self,
        cx: &BlockContext<'_, Element>,
        _table: &TableBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let rows = fragment(children);
        Ok(rsx! {
            table { key: "{id}",
                tbody { {rows} }
            }
        })
    }

    fn table_row(
        &self,
        cx: &BlockContext<'_, Element>,
        row: &TableRowBlock,
    ) -> RenderResult<Element> {
        let cells = row
            .cells
            .iter()
            .map(|cell| cx.rich_text(cell))
            .collect::<RenderResult<Vec<_>>>()?;
        let id = cx.id();
        Ok(rsx! {
            tr { key: "{id}",
                for cell in cells {
                    td { {cell} }
                }
            }
        })
    }

    fn column_list(
        &self,
        cx: &BlockContext<'_, Element>,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let columns = fragment(children);
        Ok(rsx! {
            div { key: "{id}", style: "display: flex", {columns} }
        })
    }

    fn column(&self, cx: &BlockContext<'_, Element>, children: Children) -> RenderResult<Element> {
        let id = cx.id();
        let body = fragment(children);
        Ok(rsx! {
            div { key: "{id}", style: "flex: 1", {body} }
        })
    }

    fn divider(&self, cx: &BlockContext<'_, Element>) -> RenderResult<Element> {
        let id = cx.id();
        Ok(rsx! { hr { key: "{id}" } })
    }

    fn image(&self, cx: &BlockContext<'_, Element>, image: &MediaBlock) -> RenderResult<Element> {
        let id = cx.id();
        let src = image.url();
        let alt = plain_text(&image.caption);
        Ok(rsx! { img { key: "{id}", src: "{src}", alt: "{alt}" } })
    }

    fn video(&self, cx: &BlockContext<'_, Element>, video: &MediaBlock) -> RenderResult<Element> {
        let id = cx.id();
        let src = video.url();
        Ok(rsx! {
            video { key: "{id}", controls: true, source { src: "{src}" } }
        })
    }

    fn audio(&self, cx: &BlockContext<'_, Element>, audio: &MediaBlock) -> RenderResult<Element> {
        let id = cx.id();
        let src = audio.url();
        Ok(rsx! {
            audio { key: "{id}", controls: true, source { src: "{src}" } }
        })
    }

    fn file(&self, cx: &BlockContext<'_, Element>, file: &MediaBlock) -> RenderResult<Element> {
        let id = cx.id();
        let href = file.url();
        let label = file.name.as_deref().unwrap_or(href);
        Ok(rsx! {
            div { key: "{id}",
                a { href: "{href}", download: true, "{label}" }
            }
        })
    }

    fn pdf(&self, cx: &BlockContext<'_, Element>, pdf: &MediaBlock) -> RenderResult<Element> {
        let id = cx.id();
        let src = pdf.url();
        Ok(rsx! { embed { key: "{id}", src: "{src}", r#type: "application/pdf" } })
    }

    fn embed(&self, cx: &BlockContext<'_, Element>, embed: &EmbedBlock) -> RenderResult<Element> {
        let id = cx.id();
        let src = &embed.url;
        Ok(rsx! { iframe { key: "{id}", src: "{src}" } })
    }

    fn bookmark(
        &self,
        cx: &BlockContext<'_, Element>,
        bookmark: &BookmarkBlock,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let caption = cx.rich_text(&bookmark.caption)?;
        let url = &bookmark.url;
        Ok(rsx! {
            div { key: "{id}",
                p { {caption} }
                a { href: "{url}", "{url}" }
            }
        })
    }

    fn link_preview(
        &self,
        cx: &BlockContext<'_, Element>,
        preview: &LinkPreviewBlock,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let url = &preview.url;
        Ok(rsx! { a { key: "{id}", href: "{url}", "{url}" } })
    }

    fn equation(
        &self,
        cx: &BlockContext<'_, Element>,
        equation: &EquationBlock,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let expression = &equation.expression;
        Ok(rsx! { p { key: "{id}", "{expression}" } })
    }

    fn link_to_page(
        &self,
        cx: &BlockContext<'_, Element>,
        link: &LinkToPageBlock,
    ) -> RenderResult<Element> {
        let Some(target) = link.target_id() else {
            return Ok(rsx! {});
        };
        let id = cx.id();
        let href = format!("https://www.notion.so/{}", target.replace('-', ""));
        Ok(rsx! { a { key: "{id}", href: "{href}", "{target}" } })
    }

    fn link_to_content(
        &self,
        cx: &BlockContext<'_, Element>,
        link: &LinkToContentBlock,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let path = link.slug.as_deref().unwrap_or(&link.content_id);
        let label = link.title.as_deref().unwrap_or(path);
        Ok(rsx! { a { key: "{id}", href: "/{path}", "{label}" } })
    }

    fn child_page(
        &self,
        cx: &BlockContext<'_, Element>,
        page: &TitleBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let title = &page.title;
        let nested = self.indented(children);
        Ok(rsx! {
            div { key: "{id}",
                p { "{title}" }
                {nested}
            }
        })
    }

    fn child_database(
        &self,
        cx: &BlockContext<'_, Element>,
        database: &TitleBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let title = &database.title;
        let nested = self.indented(children);
        Ok(rsx! {
            div { key: "{id}",
                p { "{title}" }
                {nested}
            }
        })
    }

    fn synced_block(
        &self,
        cx: &BlockContext<'_, Element>,
        _synced: &SyncedBlock,
        children: Children,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let body = fragment(children);
        Ok(rsx! { div { key: "{id}", {body} } })
    }

    fn template(
        &self,
        cx: &BlockContext<'_, Element>,
        template: &TextBlock,
    ) -> RenderResult<Element> {
        let id = cx.id();
        let content = cx.rich_text(&template.rich_text)?;
        Ok(rsx! { div { key: "{id}", {content} } })
    }

    fn unsupported(&self, cx: &BlockContext<'_, Element>) -> RenderResult<Element> {
        let id = cx.id();
        let block_type = cx.block().type_name();
        if block_type == "unsupported" {
            let label = &self.options.unsupported_label;
            return Ok(rsx! { p { key: "{id}", "{label}" } });
        }
        Ok(rsx! { div { key: "{id}", "No default component for {block_type}" } })
    }
}
