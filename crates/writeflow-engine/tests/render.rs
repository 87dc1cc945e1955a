use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use writeflow_engine::model::*;
use writeflow_engine::render::*;
use writeflow_engine::{Html, HtmlCatalog};

/// Catalog writing each node as `type(text)[children]`, so the shape of the
/// output tree can be compared as a string.
struct Outline;

impl Outline {
    fn node(
        &self,
        cx: &BlockContext<'_, String>,
        text: &[RichTextItem],
        children: Option<Vec<String>>,
    ) -> RenderResult<String> {
        let mut out = format!("{}({})", cx.block().type_name(), cx.rich_text(text)?);
        if let Some(children) = children {
            out.push_str(&format!("[{}]", children.join(" ")));
        }
        Ok(out)
    }
}

impl InlineHost for Outline {
    type Node = String;

    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn mark(&self, mark: Mark, inner: String) -> String {
        format!("{mark:?}<{inner}>")
    }

    fn link(&self, href: &str, inner: String) -> String {
        format!("Link<{href} {inner}>")
    }

    fn concat(&self, nodes: Vec<String>) -> String {
        nodes.concat()
    }
}

type Kids = Option<Vec<String>>;
type Cx<'a> = BlockContext<'a, String>;

impl Catalog for Outline {
    fn list(&self, kind: ListKind, items: Vec<String>) -> RenderResult<String> {
        Ok(format!("{}{{{}}}", kind.container_name(), items.join(" ")))
    }
    fn list_item(&self, cx: &Cx, _: ListKind, b: &TextBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn paragraph(&self, cx: &Cx, b: &TextBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn heading(&self, cx: &Cx, _: u8, b: &HeadingBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn to_do(&self, cx: &Cx, b: &ToDoBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn toggle(&self, cx: &Cx, b: &TextBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn quote(&self, cx: &Cx, b: &TextBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn callout(&self, cx: &Cx, b: &CalloutBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &b.rich_text, c)
    }
    fn code(&self, cx: &Cx, b: &CodeBlock) -> RenderResult<String> {
        self.node(cx, &b.rich_text, None)
    }
    fn table(&self, cx: &Cx, _: &TableBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn table_row(&self, cx: &Cx, row: &TableRowBlock) -> RenderResult<String> {
        let cells = row.cells.iter().map(|cell| cx.rich_text(cell));
        let cells: Vec<_> = cells.collect::<RenderResult<_>>()?;
        Ok(format!("table_row({})", cells.join("|")))
    }
    fn column_list(&self, cx: &Cx, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn column(&self, cx: &Cx, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn divider(&self, cx: &Cx) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn image(&self, cx: &Cx, _: &MediaBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn video(&self, cx: &Cx, _: &MediaBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn audio(&self, cx: &Cx, _: &MediaBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn file(&self, cx: &Cx, _: &MediaBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn pdf(&self, cx: &Cx, _: &MediaBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn embed(&self, cx: &Cx, _: &EmbedBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn bookmark(&self, cx: &Cx, _: &BookmarkBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn link_preview(&self, cx: &Cx, _: &LinkPreviewBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn equation(&self, cx: &Cx, _: &EquationBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn link_to_page(&self, cx: &Cx, _: &LinkToPageBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn link_to_content(&self, cx: &Cx, _: &LinkToContentBlock) -> RenderResult<String> {
        self.node(cx, &[], None)
    }
    fn child_page(&self, cx: &Cx, _: &TitleBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn child_database(&self, cx: &Cx, _: &TitleBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn synced_block(&self, cx: &Cx, _: &SyncedBlock, c: Kids) -> RenderResult<String> {
        self.node(cx, &[], c)
    }
    fn template(&self, cx: &Cx, b: &TextBlock) -> RenderResult<String> {
        self.node(cx, &b.rich_text, None)
    }
    fn unsupported(&self, cx: &Cx) -> RenderResult<String> {
        Ok(format!("unsupported<{}>", cx.block().type_name()))
    }
}

fn blocks(value: serde_json::Value) -> Vec<Block> {
    serde_json::from_value(value).unwrap()
}

fn item(id: &str, ty: &str) -> serde_json::Value {
    json!({"id": id, "type": ty, ty: {"rich_text": [{"plain_text": id}]}})
}

fn render(blocks: &[Block]) -> Vec<String> {
    render_blocks(blocks, &Outline, None).unwrap()
}

#[test]
fn consecutive_list_items_share_one_container() {
    let input = blocks(json!([
        item("a", "bulleted_list_item"),
        item("b", "bulleted_list_item"),
        item("c", "numbered_list_item"),
        item("d", "bulleted_list_item"),
    ]));

    assert_eq!(
        render(&input),
        vec![
            "bulleted_list{bulleted_list_item(a) bulleted_list_item(b)}",
            "numbered_list{numbered_list_item(c)}",
            "bulleted_list{bulleted_list_item(d)}",
        ]
    );
}

#[test]
fn list_run_is_interrupted_by_other_blocks() {
    let input = blocks(json!([
        item("one", "numbered_list_item"),
        item("p", "paragraph"),
        item("two", "numbered_list_item"),
        item("three", "numbered_list_item"),
    ]));

    assert_eq!(
        render(&input),
        vec![
            "numbered_list{numbered_list_item(one)}",
            "paragraph(p)",
            "numbered_list{numbered_list_item(two) numbered_list_item(three)}",
        ]
    );
}

#[rstest]
#[case("", 0)]
#[case("paragraph quote", 2)]
#[case("bulleted_list_item bulleted_list_item bulleted_list_item", 1)]
#[case("bulleted_list_item numbered_list_item paragraph", 3)]
#[case("toggle numbered_list_item numbered_list_item divider", 3)]
fn output_length_counts_non_list_blocks_plus_runs(#[case] types: &str, #[case] expected: usize) {
    let input: Vec<_> = types
        .split_whitespace()
        .enumerate()
        .map(|(i, ty)| item(&i.to_string(), ty))
        .collect();

    assert_eq!(render(&blocks(input.into())).len(), expected);
}

#[test]
fn children_render_inside_their_parent_and_group_at_their_own_level() {
    let input = blocks(json!([
        {"id": "t", "type": "toggle", "toggle": {"rich_text": [{"plain_text": "t"}]}, "children": [
            item("x", "bulleted_list_item"),
            item("y", "bulleted_list_item"),
            {"id": "z", "type": "paragraph", "paragraph": {"rich_text": []}, "children": [
                item("deep", "numbered_list_item"),
            ]},
        ]},
    ]));

    assert_eq!(
        render(&input),
        vec![
            "toggle(t)[bulleted_list{bulleted_list_item(x) bulleted_list_item(y)} paragraph()[numbered_list{numbered_list_item(deep)}]]"
        ]
    );
}

#[test]
fn absent_and_empty_children_stay_distinct() {
    let input = vec![
        Block::new("a", BlockData::Paragraph(TextBlock::default())),
        Block::new("b", BlockData::Paragraph(TextBlock::default())).with_children(vec![]),
    ];

    assert_eq!(render(&input), vec!["paragraph()", "paragraph()[]"]);
}

#[test]
fn table_row_children_are_never_rendered() {
    let input = blocks(json!([
        {"id": "t", "type": "table", "table": {"table_width": 2}, "children": [
            {"id": "r", "type": "table_row",
             "table_row": {"cells": [[{"plain_text": "a"}], [{"plain_text": "b"}]]},
             "children": [item("hidden", "paragraph")]},
        ]},
    ]));
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let overrides = Overrides::new().container(BlockType::Paragraph, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok("p".to_string())
    });

    let out = render_blocks(&input, &Outline, Some(&overrides)).unwrap();

    assert_eq!(out, vec!["table()[table_row(a|b)]"]);
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[test]
fn container_override_receives_same_children_as_default() {
    let input = blocks(json!([
        {"id": "p", "type": "paragraph", "paragraph": {"rich_text": []}, "children": [
            item("a", "quote"),
            item("b", "bulleted_list_item"),
        ]},
    ]));
    let default = render(&input);

    let overrides = Overrides::new().container(BlockType::Paragraph, |block, children| {
        Ok(format!("custom:{}{:?}", block.id, children.unwrap_or_default()))
    });
    let out = render_blocks(&input, &Outline, Some(&overrides)).unwrap();

    assert_eq!(
        default,
        vec!["paragraph()[quote(a) bulleted_list{bulleted_list_item(b)}]"]
    );
    assert_eq!(
        out,
        vec![r#"custom:p["quote(a)", "bulleted_list{bulleted_list_item(b)}"]"#]
    );
}

#[test]
fn leaf_override_replaces_every_block_of_its_type() {
    let input = blocks(json!([
        item("a", "divider"),
        item("b", "paragraph"),
        {"id": "c", "type": "quote", "quote": {"rich_text": []}, "children": [item("d", "divider")]},
    ]));
    let overrides =
        Overrides::new().leaf(BlockType::Divider, |block| Ok(format!("---{}", block.id)));

    let out = render_blocks(&input, &Outline, Some(&overrides)).unwrap();

    assert_eq!(out, vec!["---a", "paragraph(b)", "quote()[---d]"]);
}

#[test]
fn unknown_types_go_to_unsupported_override_or_default() {
    let input = blocks(json!([
        {"id": "x", "type": "future_block_xyz", "future_block_xyz": {"anything": 1}},
        {"id": "u", "type": "unsupported", "unsupported": {}},
    ]));

    assert_eq!(
        render(&input),
        vec!["unsupported<future_block_xyz>", "unsupported<unsupported>"]
    );

    let overrides = Overrides::new().leaf(BlockType::Unsupported, |block| {
        Ok(format!("custom<{}>", block.type_name()))
    });
    assert_eq!(
        render_blocks(&input, &Outline, Some(&overrides)).unwrap(),
        vec!["custom<future_block_xyz>", "custom<unsupported>"]
    );
}

#[test]
fn list_container_override_wraps_runs() {
    let input = blocks(json!([
        item("a", "numbered_list_item"),
        item("b", "numbered_list_item"),
        item("c", "bulleted_list_item"),
    ]));
    let overrides =
        Overrides::new().list(ListKind::Numbered, |items| Ok(items.len().to_string()));

    let out = render_blocks(&input, &Outline, Some(&overrides)).unwrap();

    assert_eq!(out, vec!["2", "bulleted_list{bulleted_list_item(c)}"]);
}

#[test]
fn rich_text_override_reaches_catalog_defaults() {
    let input = blocks(json!([
        {"id": "p", "type": "paragraph", "paragraph": {"rich_text": [
            {"plain_text": "hi", "annotations": {"bold": true}}
        ]}},
        {"id": "r", "type": "table_row", "table_row": {"cells": [[{"plain_text": "cell"}]]}},
    ]));

    assert_eq!(
        render(&input),
        vec!["paragraph(Bold<hi>)", "table_row(cell)"]
    );

    let overrides = Overrides::new().rich_text(|items| Ok(plain_text(items).to_uppercase()));
    assert_eq!(
        render_blocks(&input, &Outline, Some(&overrides)).unwrap(),
        vec!["paragraph(HI)", "table_row(CELL)"]
    );
}

#[test]
fn component_error_aborts_the_render() {
    let input = blocks(json!([
        item("a", "paragraph"),
        {"id": "b", "type": "toggle", "toggle": {"rich_text": []}, "children": [item("bad", "code")]},
        item("c", "paragraph"),
    ]));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let overrides = Overrides::new()
        .leaf(BlockType::Code, |block| {
            Err(RenderError::component("code", format!("cannot highlight {}", block.id)))
        })
        .container(BlockType::Paragraph, move |block, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(block.id.clone())
        });

    let err = render_blocks(&input, &Outline, Some(&overrides)).unwrap_err();

    assert_eq!(
        err.to_string(),
        "code component failed: cannot highlight bad"
    );
    // Rendering stops at the failure; the trailing paragraph is never reached.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn renderer_is_reusable_across_trees() {
    let overrides = Overrides::new().leaf(BlockType::Divider, |_| Ok("--".to_string()));
    let renderer = Renderer::new(&Outline).with_overrides(&overrides);

    let first = blocks(json!([item("a", "divider")]));
    let second = blocks(json!([item("b", "bulleted_list_item"), item("c", "divider")]));

    assert_eq!(renderer.render(&first).unwrap(), vec!["--"]);
    assert_eq!(
        renderer.render(&second).unwrap(),
        vec!["bulleted_list{bulleted_list_item(b)}", "--"]
    );
}

#[test]
fn container_override_sees_the_same_input_on_every_render() {
    let input = blocks(json!([
        {"id": "p", "type": "paragraph", "paragraph": {"rich_text": []}, "children": [
            item("a", "quote"),
            item("b", "numbered_list_item"),
        ]},
    ]));
    let calls: Arc<Mutex<Vec<(String, Kids)>>> = Arc::default();
    let recorder = Arc::clone(&calls);
    let overrides = Overrides::new().container(BlockType::Paragraph, move |block, children| {
        recorder.lock().unwrap().push((block.id.clone(), children));
        Ok(String::new())
    });
    let renderer = Renderer::new(&Outline).with_overrides(&overrides);

    renderer.render(&input).unwrap();
    renderer.render(&input).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    let (id, children) = &calls[0];
    assert_eq!(id, "p");
    assert_eq!(
        children.as_ref().map(|c| c.join(" ")).as_deref(),
        Some("quote(a) numbered_list{numbered_list_item(b)}")
    );
}

#[rstest]
#[case(true, "<details><summary><h1>Title</h1></summary><p>body</p></details>")]
#[case(false, "<h1>Title</h1>")]
fn heading_1_shows_children_only_when_toggleable(
    #[case] is_toggleable: bool,
    #[case] expected: &str,
) {
    let input = blocks(json!([
        {"id": "h", "type": "heading_1",
         "heading_1": {"rich_text": [{"plain_text": "Title"}], "is_toggleable": is_toggleable},
         "children": [item("body", "paragraph")]},
    ]));

    let html = render_blocks(&input, &HtmlCatalog::default(), None).unwrap();

    assert_eq!(html.len(), 1);
    let html: String = html.into_iter().map(Html::into_string).collect();
    assert_eq!(html, expected);
}
