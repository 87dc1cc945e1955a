use html_escape::{encode_double_quoted_attribute, encode_text};

/// Wrap rendered blocks in a complete HTML document.
pub fn standalone_page(title: &str, stylesheet: Option<&str>, body: &str) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", encode_text(title)));
    if let Some(href) = stylesheet {
        page.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            encode_double_quoted_attribute(href)
        ));
    }
    page.push_str("</head>\n<body>\n");
    page.push_str(body);
    page.push_str("\n</body>\n</html>\n");
    page
}
