//! Terminal host: every block renders to styled ratatui lines.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use writeflow_engine::model::{
    BookmarkBlock, CalloutBlock, CodeBlock, EmbedBlock, EquationBlock, HeadingBlock,
    LinkPreviewBlock, LinkToContentBlock, LinkToPageBlock, Mark, MediaBlock, SyncedBlock,
    TableBlock, TableRowBlock, TextBlock, TitleBlock, ToDoBlock, plain_text,
};
use writeflow_engine::render::{BlockContext, Catalog, InlineHost, ListKind, RenderResult};

pub type Lines = Vec<Line<'static>>;

type Children = Option<Vec<Lines>>;

const DIVIDER_WIDTH: usize = 40;

#[derive(Debug, Clone)]
pub struct TerminalCatalog {
    indent: usize,
    callout_placeholder: String,
    unsupported_label: String,
}

impl Default for TerminalCatalog {
    fn default() -> Self {
        Self {
            indent: 2,
            callout_placeholder: "X".to_string(),
            unsupported_label: "unsupported".to_string(),
        }
    }
}

impl TerminalCatalog {
    pub fn new(
        indent: usize,
        callout_placeholder: impl Into<String>,
        unsupported_label: impl Into<String>,
    ) -> Self {
        Self {
            indent,
            callout_placeholder: callout_placeholder.into(),
            unsupported_label: unsupported_label.into(),
        }
    }

    fn nested(&self, children: Children) -> Lines {
        let pad = " ".repeat(self.indent);
        flatten(children)
            .into_iter()
            .map(|line| prefixed(Span::raw(pad.clone()), line))
            .collect()
    }
}

fn flatten(children: Children) -> Lines {
    children.into_iter().flatten().flatten().collect()
}

fn prefixed(prefix: Span<'static>, mut line: Line<'static>) -> Line<'static> {
    line.spans.insert(0, prefix);
    line
}

/// Put `marker` before the first line and align the rest under it.
fn hanging(marker: Span<'static>, lines: Lines) -> Lines {
    let pad = " ".repeat(marker.width());
    let mut lines = lines.into_iter();
    let first = lines.next().unwrap_or_default();
    std::iter::once(prefixed(marker, first))
        .chain(lines.map(|line| prefixed(Span::raw(pad.clone()), line)))
        .collect()
}

fn styled_line(mut line: Line<'static>, style: Style) -> Line<'static> {
    for span in &mut line.spans {
        span.style = span.style.patch(style);
    }
    line
}

fn styled(lines: Lines, style: Style) -> Lines {
    lines
        .into_iter()
        .map(|line| styled_line(line, style))
        .collect()
}

fn dim_line(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn dim(text: String) -> Lines {
    vec![dim_line(text)]
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

fn link_line(label: String, url: &str) -> Lines {
    vec![Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(url.to_string(), link_style()),
    ])]
}

impl InlineHost for TerminalCatalog {
    type Node = Lines;

    fn text(&self, text: &str) -> Lines {
        text.split('\n')
            .map(|part| Line::from(Span::raw(part.to_string())))
            .collect()
    }

    fn mark(&self, mark: Mark, inner: Lines) -> Lines {
        let style = match mark {
            Mark::Code => Style::default().fg(Color::Yellow),
            Mark::Underline => Style::default().add_modifier(Modifier::UNDERLINED),
            Mark::Strikethrough => Style::default().add_modifier(Modifier::CROSSED_OUT),
            Mark::Italic => Style::default().add_modifier(Modifier::ITALIC),
            Mark::Bold => Style::default().add_modifier(Modifier::BOLD),
        };
        styled(inner, style)
    }

    fn link(&self, _href: &str, inner: Lines) -> Lines {
        styled(inner, link_style())
    }

    /// Inline runs flow on: each node continues the last line of the previous one.
    fn concat(&self, nodes: Vec<Lines>) -> Lines {
        let mut out: Lines = Vec::new();
        for node in nodes {
            let mut lines = node.into_iter();
            if let Some(first) = lines.next() {
                match out.last_mut() {
                    Some(last) => last.spans.extend(first.spans),
                    None => out.push(first),
                }
            }
            out.extend(lines);
        }
        out
    }
}

impl Catalog for TerminalCatalog {
    fn list(&self, kind: ListKind, items: Vec<Lines>) -> RenderResult<Lines> {
        Ok(items
            .into_iter()
            .enumerate()
            .flat_map(|(idx, item)| {
                let marker = match kind {
                    ListKind::Bulleted => "• ".to_string(),
                    ListKind::Numbered => format!("{}. ", idx + 1),
                };
                hanging(Span::raw(marker), item)
            })
            .collect())
    }

    fn list_item(
        &self,
        cx: &BlockContext<'_, Lines>,
        _kind: ListKind,
        item: &TextBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        // The container adds the marker and hangs everything under it.
        let mut lines = cx.rich_text(&item.rich_text)?;
        lines.extend(flatten(children));
        Ok(lines)
    }

    fn paragraph(
        &self,
        cx: &BlockContext<'_, Lines>,
        paragraph: &TextBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let mut lines = cx.rich_text(&paragraph.rich_text)?;
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn heading(
        &self,
        cx: &BlockContext<'_, Lines>,
        level: u8,
        heading: &HeadingBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let color = match level {
            1 => Color::Magenta,
            2 => Color::Cyan,
            _ => Color::Green,
        };
        let marker = if heading.is_toggleable {
            "▾ ".to_string()
        } else {
            format!("{} ", "#".repeat(level as usize))
        };
        let title = styled(
            hanging(Span::raw(marker), cx.rich_text(&heading.rich_text)?),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
        if !heading.is_toggleable {
            return Ok(title);
        }
        let mut lines = title;
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn to_do(
        &self,
        cx: &BlockContext<'_, Lines>,
        to_do: &ToDoBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let (marker, style) = if to_do.checked {
            let done = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
            ("[x] ", done)
        } else {
            ("[ ] ", Style::default())
        };
        let mut lines = hanging(
            Span::raw(marker),
            styled(cx.rich_text(&to_do.rich_text)?, style),
        );
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn toggle(
        &self,
        cx: &BlockContext<'_, Lines>,
        toggle: &TextBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let mut lines = hanging(Span::raw("▾ "), cx.rich_text(&toggle.rich_text)?);
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn quote(
        &self,
        cx: &BlockContext<'_, Lines>,
        quote: &TextBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let bar = Span::styled("│ ", Style::default().fg(Color::DarkGray));
        let mut lines = cx.rich_text(&quote.rich_text)?;
        lines.extend(flatten(children));
        Ok(lines
            .into_iter()
            .map(|line| prefixed(bar.clone(), line))
            .collect())
    }

    fn callout(
        &self,
        cx: &BlockContext<'_, Lines>,
        callout: &CalloutBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let icon = callout
            .icon
            .as_ref()
            .and_then(|icon| icon.emoji())
            .unwrap_or(self.callout_placeholder.as_str());
        let mut lines = hanging(
            Span::raw(format!("{icon} ")),
            cx.rich_text(&callout.rich_text)?,
        );
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn code(&self, cx: &BlockContext<'_, Lines>, code: &CodeBlock) -> RenderResult<Lines> {
        let language = code.language.as_deref().unwrap_or_default();
        let mut lines = dim(format!("```{language}"));
        lines.extend(styled(
            cx.rich_text(&code.rich_text)?,
            Style::default().fg(Color::Yellow),
        ));
        lines.extend(dim("```".to_string()));
        Ok(lines)
    }

    fn table(
        &self,
        _cx: &BlockContext<'_, Lines>,
        table: &TableBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let mut rows = flatten(children);
        if table.has_column_header && !rows.is_empty() {
            let header = rows.remove(0);
            let rule = dim_line("─".repeat(header.width()));
            let bold = Style::default().add_modifier(Modifier::BOLD);
            rows.insert(0, styled_line(header, bold));
            rows.insert(1, rule);
        }
        Ok(rows)
    }

    fn table_row(&self, cx: &BlockContext<'_, Lines>, row: &TableRowBlock) -> RenderResult<Lines> {
        let mut spans = vec![Span::raw("│ ")];
        for cell in &row.cells {
            let cell = cx.rich_text(cell)?;
            spans.extend(cell.into_iter().flat_map(|line| line.spans));
            spans.push(Span::raw(" │ "));
        }
        Ok(vec![Line::from(spans)])
    }

    fn column_list(
        &self,
        _cx: &BlockContext<'_, Lines>,
        children: Children,
    ) -> RenderResult<Lines> {
        Ok(flatten(children))
    }

    fn column(&self, _cx: &BlockContext<'_, Lines>, children: Children) -> RenderResult<Lines> {
        Ok(flatten(children))
    }

    fn divider(&self, _cx: &BlockContext<'_, Lines>) -> RenderResult<Lines> {
        Ok(dim("─".repeat(DIVIDER_WIDTH)))
    }

    fn image(&self, _cx: &BlockContext<'_, Lines>, image: &MediaBlock) -> RenderResult<Lines> {
        let alt = plain_text(&image.caption);
        let label = if alt.is_empty() {
            "[image]".to_string()
        } else {
            format!("[image: {alt}]")
        };
        Ok(link_line(label, image.url()))
    }

    fn video(&self, _cx: &BlockContext<'_, Lines>, video: &MediaBlock) -> RenderResult<Lines> {
        Ok(link_line("[video]".to_string(), video.url()))
    }

    fn audio(&self, _cx: &BlockContext<'_, Lines>, audio: &MediaBlock) -> RenderResult<Lines> {
        Ok(link_line("[audio]".to_string(), audio.url()))
    }

    fn file(&self, _cx: &BlockContext<'_, Lines>, file: &MediaBlock) -> RenderResult<Lines> {
        let label = match &file.name {
            Some(name) => format!("[file: {name}]"),
            None => "[file]".to_string(),
        };
        Ok(link_line(label, file.url()))
    }

    fn pdf(&self, _cx: &BlockContext<'_, Lines>, pdf: &MediaBlock) -> RenderResult<Lines> {
        Ok(link_line("[pdf]".to_string(), pdf.url()))
    }

    fn embed(&self, _cx: &BlockContext<'_, Lines>, embed: &EmbedBlock) -> RenderResult<Lines> {
        Ok(link_line("[embed]".to_string(), &embed.url))
    }

    fn bookmark(
        &self,
        cx: &BlockContext<'_, Lines>,
        bookmark: &BookmarkBlock,
    ) -> RenderResult<Lines> {
        let mut lines = link_line("[bookmark]".to_string(), &bookmark.url);
        if !bookmark.caption.is_empty() {
            lines.extend(self.nested(Some(vec![cx.rich_text(&bookmark.caption)?])));
        }
        Ok(lines)
    }

    fn link_preview(
        &self,
        _cx: &BlockContext<'_, Lines>,
        preview: &LinkPreviewBlock,
    ) -> RenderResult<Lines> {
        Ok(link_line("[link]".to_string(), &preview.url))
    }

    fn equation(
        &self,
        _cx: &BlockContext<'_, Lines>,
        equation: &EquationBlock,
    ) -> RenderResult<Lines> {
        Ok(vec![Line::from(Span::styled(
            equation.expression.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))])
    }

    fn link_to_page(
        &self,
        _cx: &BlockContext<'_, Lines>,
        link: &LinkToPageBlock,
    ) -> RenderResult<Lines> {
        Ok(match link.target_id() {
            Some(target) => link_line("→ page".to_string(), target),
            None => Vec::new(),
        })
    }

    fn link_to_content(
        &self,
        _cx: &BlockContext<'_, Lines>,
        link: &LinkToContentBlock,
    ) -> RenderResult<Lines> {
        let path = link.slug.as_deref().unwrap_or(link.content_id.as_str());
        let label = format!("→ {}", link.title.as_deref().unwrap_or(path));
        Ok(link_line(label, &format!("/{path}")))
    }

    fn child_page(
        &self,
        _cx: &BlockContext<'_, Lines>,
        page: &TitleBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let mut lines = vec![Line::from(format!("📄 {}", page.title))];
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn child_database(
        &self,
        _cx: &BlockContext<'_, Lines>,
        database: &TitleBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        let mut lines = vec![Line::from(format!("🗃 {}", database.title))];
        lines.extend(self.nested(children));
        Ok(lines)
    }

    fn synced_block(
        &self,
        _cx: &BlockContext<'_, Lines>,
        _synced: &SyncedBlock,
        children: Children,
    ) -> RenderResult<Lines> {
        Ok(flatten(children))
    }

    fn template(&self, cx: &BlockContext<'_, Lines>, template: &TextBlock) -> RenderResult<Lines> {
        cx.rich_text(&template.rich_text)
    }

    fn unsupported(&self, cx: &BlockContext<'_, Lines>) -> RenderResult<Lines> {
        let block_type = cx.block().type_name();
        if block_type == "unsupported" {
            return Ok(dim(format!("[{}]", self.unsupported_label)));
        }
        Ok(dim(format!("[no default component for {block_type}]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use writeflow_engine::model::Block;
    use writeflow_engine::render_blocks;

    fn to_plain(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    fn render(value: serde_json::Value) -> Vec<String> {
        let blocks: Vec<Block> = serde_json::from_value(value).unwrap();
        let nodes = render_blocks(&blocks, &TerminalCatalog::default(), None).unwrap();
        to_plain(&nodes.concat())
    }

    fn text(s: &str) -> serde_json::Value {
        json!([{ "plain_text": s }])
    }

    #[test]
    fn test_numbered_list_counts_within_run() {
        let lines = render(json!([
            {"id": "1", "type": "numbered_list_item", "numbered_list_item": {"rich_text": text("one")}},
            {"id": "2", "type": "numbered_list_item", "numbered_list_item": {"rich_text": text("two")},
             "children": [
                {"id": "3", "type": "bulleted_list_item", "bulleted_list_item": {"rich_text": text("nested")}}
             ]},
            {"id": "4", "type": "paragraph", "paragraph": {"rich_text": text("break")}},
            {"id": "5", "type": "numbered_list_item", "numbered_list_item": {"rich_text": text("again")}}
        ]));

        assert_eq!(
            lines,
            vec!["1. one", "2. two", "   • nested", "break", "1. again"]
        );
    }

    #[test]
    fn test_to_do_and_quote_markers() {
        let lines = render(json!([
            {"id": "t", "type": "to_do", "to_do": {"rich_text": text("ship"), "checked": true}},
            {"id": "u", "type": "to_do", "to_do": {"rich_text": text("test"), "checked": false}},
            {"id": "q", "type": "quote", "quote": {"rich_text": text("wise words")},
             "children": [{"id": "p", "type": "paragraph", "paragraph": {"rich_text": text("more")}}]}
        ]));

        assert_eq!(
            lines,
            vec!["[x] ship", "[ ] test", "│ wise words", "│ more"]
        );
    }

    #[test]
    fn test_heading_toggle_quirk() {
        let child = json!([{"id": "p", "type": "paragraph", "paragraph": {"rich_text": text("body")}}]);
        let lines = render(json!([
            {"id": "a", "type": "heading_2", "heading_2": {"rich_text": text("Open"), "is_toggleable": true}, "children": child},
            {"id": "b", "type": "heading_2", "heading_2": {"rich_text": text("Shut"), "is_toggleable": false}, "children": child}
        ]));

        assert_eq!(lines, vec!["▾ Open", "  body", "## Shut"]);
    }

    #[test]
    fn test_code_keeps_line_breaks() {
        let lines = render(json!([
            {"id": "c", "type": "code", "code": {"rich_text": text("let a = 1;\nlet b = 2;"), "language": "rust"}}
        ]));

        assert_eq!(lines, vec!["```rust", "let a = 1;", "let b = 2;", "```"]);
    }

    #[test]
    fn test_table_with_header_row() {
        let lines = render(json!([
            {"id": "t", "type": "table", "table": {"table_width": 2, "has_column_header": true}, "children": [
                {"id": "r1", "type": "table_row", "table_row": {"cells": [text("a"), text("b")]}},
                {"id": "r2", "type": "table_row", "table_row": {"cells": [text("c"), text("d")]}}
            ]}
        ]));

        assert_eq!(lines, vec!["│ a │ b │ ", "──────────", "│ c │ d │ "]);
    }

    #[test]
    fn test_marks_apply_style_without_changing_text() {
        let blocks: Vec<Block> = serde_json::from_value(json!([
            {"id": "p", "type": "paragraph", "paragraph": {"rich_text": [
                {"plain_text": "plain "},
                {"plain_text": "bold", "annotations": {"bold": true, "italic": true}}
            ]}}
        ]))
        .unwrap();

        let nodes = render_blocks(&blocks, &TerminalCatalog::default(), None).unwrap();
        let line = &nodes[0][0];

        assert_eq!(to_plain(&nodes[0]), vec!["plain bold"]);
        assert_eq!(
            line.spans[1].style.add_modifier,
            Modifier::BOLD | Modifier::ITALIC
        );
    }

    #[test]
    fn test_unknown_block_placeholder() {
        let lines = render(json!([
            {"id": "x", "type": "future_block_xyz", "future_block_xyz": {}},
            {"id": "u", "type": "unsupported", "unsupported": {}}
        ]));

        assert_eq!(
            lines,
            vec!["[no default component for future_block_xyz]", "[unsupported]"]
        );
    }
}
