//! # HTML Catalog
//!
//! Default components producing escaped HTML fragments. This is the host the
//! command line tool and server-side integrations use; the markup mirrors the
//! Dioxus catalog element for element.

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::model::{
    BookmarkBlock, CalloutBlock, CodeBlock, EmbedBlock, EquationBlock, HeadingBlock,
    LinkPreviewBlock, LinkToContentBlock, LinkToPageBlock, Mark, MediaBlock, SyncedBlock,
    TableBlock, TableRowBlock, TextBlock, TitleBlock, ToDoBlock, plain_text,
};
use crate::render::{BlockContext, Catalog, InlineHost, ListKind, RenderResult};

/// A fragment of HTML. Text placed in it has already been escaped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html(String);

impl Html {
    /// Trusted markup, inserted as is.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn text(text: &str) -> Self {
        Self(encode_text(text).into_owned())
    }

    pub fn concat(parts: impl IntoIterator<Item = Html>) -> Self {
        Self(parts.into_iter().map(|part| part.0).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn attr(value: &str) -> std::borrow::Cow<'_, str> {
    encode_double_quoted_attribute(value)
}

fn join(children: Option<Vec<Html>>) -> String {
    children.map(Html::concat).unwrap_or_default().into_string()
}

/// Presentation knobs of the HTML catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Left margin of nested children, in pixels.
    pub child_indent_px: u32,
    /// Shown for callouts whose icon is not an emoji.
    pub callout_placeholder: String,
    /// Text of the `unsupported` block placeholder.
    pub unsupported_label: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            child_indent_px: 24,
            callout_placeholder: "X".to_string(),
            unsupported_label: "unsupported".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlCatalog {
    options: HtmlOptions,
}

impl HtmlCatalog {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Nested children under an indented wrapper, or nothing when there are none.
    fn indented(&self, children: Option<Vec<Html>>) -> String {
        match children {
            Some(children) if !children.is_empty() => format!(
                r#"<div style="margin-left: {}px">{}</div>"#,
                self.options.child_indent_px,
                Html::concat(children)
            ),
            _ => String::new(),
        }
    }

    fn source_element(&self, tag: &str, media: &MediaBlock) -> Html {
        Html::raw(format!(
            r#"<{tag} controls><source src="{}"></{tag}>"#,
            attr(media.url())
        ))
    }
}

impl InlineHost for HtmlCatalog {
    type Node = Html;

    fn text(&self, text: &str) -> Html {
        Html::text(text)
    }

    fn mark(&self, mark: Mark, inner: Html) -> Html {
        let tag = match mark {
            Mark::Code => "code",
            Mark::Underline => "u",
            Mark::Strikethrough => "s",
            Mark::Italic => "i",
            Mark::Bold => "b",
        };
        Html::raw(format!("<{tag}>{inner}</{tag}>"))
    }

    fn link(&self, href: &str, inner: Html) -> Html {
        Html::raw(format!(r#"<a href="{}">{inner}</a>"#, attr(href)))
    }

    fn concat(&self, nodes: Vec<Html>) -> Html {
        Html::concat(nodes)
    }
}

impl Catalog for HtmlCatalog {
    fn list(&self, kind: ListKind, items: Vec<Html>) -> RenderResult<Html> {
        let tag = match kind {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        };
        Ok(Html::raw(format!("<{tag}>{}</{tag}>", Html::concat(items))))
    }

    fn list_item(
        &self,
        cx: &BlockContext<'_, Html>,
        _kind: ListKind,
        item: &TextBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            "<li>{}{}</li>",
            cx.rich_text(&item.rich_text)?,
            self.indented(children)
        )))
    }

    fn paragraph(
        &self,
        cx: &BlockContext<'_, Html>,
        paragraph: &TextBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            "<p>{}</p>{}",
            cx.rich_text(&paragraph.rich_text)?,
            self.indented(children)
        )))
    }

    fn heading(
        &self,
        cx: &BlockContext<'_, Html>,
        level: u8,
        heading: &HeadingBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        let title = format!("<h{level}>{}</h{level}>", cx.rich_text(&heading.rich_text)?);
        if !heading.is_toggleable {
            // Children of a plain heading are not shown.
            return Ok(Html::raw(title));
        }
        Ok(Html::raw(format!(
            "<details><summary>{title}</summary>{}</details>",
            join(children)
        )))
    }

    fn to_do(
        &self,
        cx: &BlockContext<'_, Html>,
        to_do: &ToDoBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        let id = attr(cx.id());
        let checked = if to_do.checked { " checked" } else { "" };
        Ok(Html::raw(format!(
            r#"<div><input id="{id}" type="checkbox"{checked} disabled><label for="{id}">{}</label>{}</div>"#,
            cx.rich_text(&to_do.rich_text)?,
            join(children)
        )))
    }

    fn toggle(
        &self,
        cx: &BlockContext<'_, Html>,
        toggle: &TextBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            "<details><summary>{}</summary>{}</details>",
            cx.rich_text(&toggle.rich_text)?,
            join(children)
        )))
    }

    fn quote(
        &self,
        cx: &BlockContext<'_, Html>,
        quote: &TextBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            r#"<blockquote style="border-left: 4px solid black; padding-left: 8px">{}{}</blockquote>"#,
            cx.rich_text(&quote.rich_text)?,
            join(children)
        )))
    }

    fn callout(
        &self,
        cx: &BlockContext<'_, Html>,
        callout: &CalloutBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        let icon = callout
            .icon
            .as_ref()
            .and_then(|icon| icon.emoji())
            .unwrap_or(self.options.callout_placeholder.as_str());
        Ok(Html::raw(format!(
            "<div><span>{}</span>{}{}</div>",
            Html::text(icon),
            cx.rich_text(&callout.rich_text)?,
            self.indented(children)
        )))
    }

    fn code(&self, cx: &BlockContext<'_, Html>, code: &CodeBlock) -> RenderResult<Html> {
        let class = code
            .language
            .as_deref()
            .map(|lang| format!(r#" class="language-{}""#, attr(lang)))
            .unwrap_or_default();
        Ok(Html::raw(format!(
            "<pre><code{class}>{}</code></pre>",
            cx.rich_text(&code.rich_text)?
        )))
    }

    fn table(
        &self,
        _cx: &BlockContext<'_, Html>,
        _table: &TableBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!("<table><tbody>{}</tbody></table>", join(children))))
    }

    fn table_row(&self, cx: &BlockContext<'_, Html>, row: &TableRowBlock) -> RenderResult<Html> {
        let cells = row
            .cells
            .iter()
            .map(|cell| Ok(Html::raw(format!("<td>{}</td>", cx.rich_text(cell)?))))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(Html::raw(format!("<tr>{}</tr>", Html::concat(cells))))
    }

    fn column_list(
        &self,
        _cx: &BlockContext<'_, Html>,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(r#"<div style="display: flex">{}</div>"#, join(children))))
    }

    fn column(
        &self,
        _cx: &BlockContext<'_, Html>,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(r#"<div style="flex: 1">{}</div>"#, join(children))))
    }

    fn divider(&self, _cx: &BlockContext<'_, Html>) -> RenderResult<Html> {
        Ok(Html::raw("<hr>"))
    }

    fn image(&self, _cx: &BlockContext<'_, Html>, image: &MediaBlock) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            r#"<img src="{}" alt="{}">"#,
            attr(image.url()),
            attr(&plain_text(&image.caption))
        )))
    }

    fn video(&self, _cx: &BlockContext<'_, Html>, video: &MediaBlock) -> RenderResult<Html> {
        Ok(self.source_element("video", video))
    }

    fn audio(&self, _cx: &BlockContext<'_, Html>, audio: &MediaBlock) -> RenderResult<Html> {
        Ok(self.source_element("audio", audio))
    }

    fn file(&self, _cx: &BlockContext<'_, Html>, file: &MediaBlock) -> RenderResult<Html> {
        let label = file.name.clone().unwrap_or_else(|| file.url().to_string());
        Ok(Html::raw(format!(
            r#"<div><a href="{}" download>{}</a></div>"#,
            attr(file.url()),
            Html::text(&label)
        )))
    }

    fn pdf(&self, _cx: &BlockContext<'_, Html>, pdf: &MediaBlock) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            r#"<embed src="{}" type="application/pdf">"#,
            attr(pdf.url())
        )))
    }

    fn embed(&self, _cx: &BlockContext<'_, Html>, embed: &EmbedBlock) -> RenderResult<Html> {
        Ok(Html::raw(format!(r#"<iframe src="{}"></iframe>"#, attr(&embed.url))))
    }

    fn bookmark(
        &self,
        cx: &BlockContext<'_, Html>,
        bookmark: &BookmarkBlock,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            r#"<div><p>{}</p><a href="{}">{}</a></div>"#,
            cx.rich_text(&bookmark.caption)?,
            attr(&bookmark.url),
            Html::text(&bookmark.url)
        )))
    }

    fn link_preview(
        &self,
        _cx: &BlockContext<'_, Html>,
        preview: &LinkPreviewBlock,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            r#"<a href="{}">{}</a>"#,
            attr(&preview.url),
            Html::text(&preview.url)
        )))
    }

    fn equation(
        &self,
        _cx: &BlockContext<'_, Html>,
        equation: &EquationBlock,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!("<p>{}</p>", Html::text(&equation.expression))))
    }

    fn link_to_page(
        &self,
        _cx: &BlockContext<'_, Html>,
        link: &LinkToPageBlock,
    ) -> RenderResult<Html> {
        let Some(target) = link.target_id() else {
            return Ok(Html::default());
        };
        Ok(Html::raw(format!(
            r#"<a href="https://www.notion.so/{}">{}</a>"#,
            attr(&target.replace('-', "")),
            Html::text(target)
        )))
    }

    fn link_to_content(
        &self,
        _cx: &BlockContext<'_, Html>,
        link: &LinkToContentBlock,
    ) -> RenderResult<Html> {
        let path = link.slug.as_deref().unwrap_or(link.content_id.as_str());
        let label = link.title.as_deref().unwrap_or(path);
        Ok(Html::raw(format!(r#"<a href="/{}">{}</a>"#, attr(path), Html::text(label))))
    }

    fn child_page(
        &self,
        _cx: &BlockContext<'_, Html>,
        page: &TitleBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            "<div><p>{}</p>{}</div>",
            Html::text(&page.title),
            self.indented(children)
        )))
    }

    fn child_database(
        &self,
        _cx: &BlockContext<'_, Html>,
        database: &TitleBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!(
            "<div><p>{}</p>{}</div>",
            Html::text(&database.title),
            self.indented(children)
        )))
    }

    fn synced_block(
        &self,
        _cx: &BlockContext<'_, Html>,
        _synced: &SyncedBlock,
        children: Option<Vec<Html>>,
    ) -> RenderResult<Html> {
        Ok(Html::raw(format!("<div>{}</div>", join(children))))
    }

    fn template(&self, cx: &BlockContext<'_, Html>, template: &TextBlock) -> RenderResult<Html> {
        Ok(Html::raw(format!("<div>{}</div>", cx.rich_text(&template.rich_text)?)))
    }

    fn unsupported(&self, cx: &BlockContext<'_, Html>) -> RenderResult<Html> {
        let block_type = cx.block().type_name();
        if block_type == "unsupported" {
            return Ok(Html::raw(format!("<p>{}</p>", Html::text(&self.options.unsupported_label))));
        }
        Ok(Html::raw(format!(
            "<div>No default component for {}</div>",
            Html::text(block_type)
        )))
    }
}
