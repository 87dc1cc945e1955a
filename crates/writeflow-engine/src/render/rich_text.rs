use crate::model::RichTextItem;

use super::catalog::InlineHost;

/// Default inline formatting of a rich text sequence.
///
/// Each item starts as its plain text, then every active annotation wraps the
/// previous result in the fixed order code, underline, strikethrough, italic,
/// bold (so bold is outermost). A link wraps the fully decorated item. Items
/// are concatenated in order into a single node.
pub fn format_rich_text<H: InlineHost + ?Sized>(host: &H, items: &[RichTextItem]) -> H::Node {
    let nodes = items
        .iter()
        .map(|item| {
            let plain = host.text(&item.plain_text);
            let decorated = item
                .annotations
                .marks()
                .fold(plain, |inner, mark| host.mark(mark, inner));
            match &item.href {
                Some(href) => host.link(href, decorated),
                None => decorated,
            }
        })
        .collect();
    host.concat(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Renders inline nodes as an s-expression so nesting is visible.
    struct Sexp;

    impl InlineHost for Sexp {
        type Node = String;

        fn text(&self, text: &str) -> String {
            format!("{text:?}")
        }

        fn mark(&self, mark: Mark, inner: String) -> String {
            format!("({mark:?} {inner})")
        }

        fn link(&self, href: &str, inner: String) -> String {
            format!("(Link {href} {inner})")
        }

        fn concat(&self, nodes: Vec<String>) -> String {
            format!("[{}]", nodes.join(" "))
        }
    }

    #[rstest]
    #[case(RichTextItem::plain("hi"), r#"["hi"]"#)]
    #[case(
        RichTextItem::plain("hi").with_mark(Mark::Bold).with_mark(Mark::Italic),
        r#"[(Bold (Italic "hi"))]"#
    )]
    #[case(
        RichTextItem::plain("x").with_mark(Mark::Code).with_mark(Mark::Underline),
        r#"[(Underline (Code "x"))]"#
    )]
    #[case(
        RichTextItem::plain("all")
            .with_mark(Mark::Bold)
            .with_mark(Mark::Italic)
            .with_mark(Mark::Strikethrough)
            .with_mark(Mark::Underline)
            .with_mark(Mark::Code),
        r#"[(Bold (Italic (Strikethrough (Underline (Code "all")))))]"#
    )]
    #[case(
        RichTextItem::plain("docs").with_mark(Mark::Bold).with_href("/docs"),
        r#"[(Link /docs (Bold "docs"))]"#
    )]
    fn marks_nest_in_fixed_order(#[case] item: RichTextItem, #[case] expected: &str) {
        assert_eq!(format_rich_text(&Sexp, &[item]), expected);
    }

    #[test]
    fn items_concatenate_in_order() {
        let items = vec![
            RichTextItem::plain("a"),
            RichTextItem::plain("b").with_mark(Mark::Italic),
            RichTextItem::plain("c"),
        ];
        assert_eq!(format_rich_text(&Sexp, &items), r#"["a" (Italic "b") "c"]"#);
    }

    #[test]
    fn empty_sequence_is_an_empty_concat() {
        assert_eq!(format_rich_text(&Sexp, &[]), "[]");
    }
}
