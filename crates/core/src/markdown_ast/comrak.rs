use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::markdown_ast::types::HeadingInfo;

/// Every heading of the document, in order.
pub fn find_headings(input: &str) -> Vec<HeadingInfo> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    let mut headings = Vec::new();

    for node in root.descendants() {
        if let NodeValue::Heading(ref heading) = node.data.borrow().value {
            let title = collect_text(node).trim().to_string();
            if !title.is_empty() {
                headings.push(HeadingInfo { title, level: heading.level });
            }
        }
    }

    headings
}

/// The readable text of paragraphs, headings and table cells, one entry per
/// source line. Code spans, code blocks and raw HTML are left out.
pub fn prose_lines(input: &str) -> Vec<String> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    let mut lines = Vec::new();

    for node in root.descendants() {
        let is_text_block = matches!(
            node.data.borrow().value,
            NodeValue::Paragraph | NodeValue::Heading(_) | NodeValue::TableCell
        );
        if is_text_block {
            lines.extend(collect_text(node).lines().map(ToOwned::to_owned));
        }
    }

    lines
}

// --- Internal helpers ---

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    // Enable GFM extensions for compatibility
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    // Don't convert quotes/dashes
    options.parse.smart = false;

    options
}

/// Concatenated text below `node`, with soft and hard breaks as newlines.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match child.data.borrow().value {
            NodeValue::Text(ref t) => text.push_str(t),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_headings() {
        let doc = "# Paris\n\nIntro\n\n## Museums *and* galleries\n\n### `code` heading\n";
        let headings = find_headings(doc);
        let titles: Vec<_> = headings.iter().map(|h| (h.title.as_str(), h.level)).collect();
        assert_eq!(titles, [("Paris", 1), ("Museums and galleries", 2), ("heading", 3)]);
    }

    #[test]
    fn test_setext_heading() {
        let headings = find_headings("Overview\n========\n");
        assert_eq!(headings, vec![HeadingInfo { title: "Overview".into(), level: 1 }]);
    }

    #[test]
    fn test_prose_lines_skip_code() {
        let doc = "First line\nsecond line\n\n```\n#not-a-tag\n```\n\nInline `#code` here\n";
        let lines = prose_lines(doc);
        assert_eq!(lines, ["First line", "second line", "Inline  here"]);
    }

    #[test]
    fn test_prose_lines_include_list_items() {
        let lines = prose_lines("- one #tag\n- two\n");
        assert_eq!(lines, ["one #tag", "two"]);
    }
}
