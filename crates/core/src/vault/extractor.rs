//! Note content extraction: title, aliases, tags, headings, block ids.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::{self, Frontmatter, ParsedDocument};
use crate::index::DocumentMetadata;
use crate::markdown_ast::{find_headings, prose_lines};

// `#tag` not glued to a preceding word, URL fragment or entity.
static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\p{L}\p{N}_&#/])#([\p{L}\p{N}_/-]+)").unwrap()
});

// Trailing `^block-id` marker, alone on its line or after whitespace.
static BLOCK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\^([A-Za-z0-9-]+)\s*$").unwrap());

/// Extract the linkable structure of a note from its file content.
///
/// Title comes from frontmatter `title`, else the file stem. Invalid
/// frontmatter is ignored with a warning; the body is still scanned.
pub fn extract_metadata(content: &str, file_path: &Path) -> DocumentMetadata {
    let parsed = frontmatter::parse(content).unwrap_or_else(|e| {
        tracing::warn!(path = %file_path.display(), error = %e, "ignoring invalid frontmatter");
        ParsedDocument { frontmatter: None, body: strip_frontmatter_block(content) }
    });
    let fm = parsed.frontmatter.as_ref();

    let title = fm.and_then(|fm| fm.text("title")).unwrap_or_else(|| file_stem(file_path));

    let aliases = fm
        .map(|fm| fm.list("aliases", false))
        .unwrap_or_default()
        .into_iter()
        .filter(|alias| *alias != title)
        .collect();

    let mut tags = frontmatter_tags(fm);
    let mut block_ids = BTreeSet::new();
    for line in prose_lines(&parsed.body) {
        tags.extend(inline_tags(&line));
        if let Some(cap) = BLOCK_ID_RE.captures(&line) {
            block_ids.insert(cap[1].to_string());
        }
    }

    let headings = find_headings(&parsed.body).into_iter().map(|h| h.title).collect();

    DocumentMetadata { title, aliases, tags, headings, block_ids }
}

fn frontmatter_tags(fm: Option<&Frontmatter>) -> BTreeSet<String> {
    fm.map(|fm| fm.list("tags", true))
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.trim_start_matches('#').to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn inline_tags(line: &str) -> impl Iterator<Item = String> + '_ {
    INLINE_TAG_RE
        .captures_iter(line)
        .map(|cap| cap[1].trim_end_matches(['/', '-']).to_string())
        // Purely numeric words like `#1` are issue numbers, not tags.
        .filter(|tag| !tag.is_empty() && !tag.chars().all(|c| c.is_ascii_digit()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string()
}

/// Drop a leading `---` block that failed to parse so its YAML is not read
/// as prose.
fn strip_frontmatter_block(content: &str) -> String {
    let trimmed = content.trim_start();
    let Some(rest) = trimmed.strip_prefix("---\n").or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return content.to_string();
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end() == "---" {
            return rest[offset..].to_string();
        }
    }
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn extract(content: &str) -> DocumentMetadata {
        extract_metadata(content, Path::new("notes/Some Note.md"))
    }

    #[test]
    fn test_title_from_frontmatter() {
        let meta = extract("---\ntitle: Paris\n---\n# Heading\n");
        assert_eq!(meta.title, "Paris");
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let meta = extract("# Heading\n\nBody");
        assert_eq!(meta.title, "Some Note");
    }

    #[test]
    fn test_aliases() {
        let meta = extract("---\ntitle: Paris\naliases: [Lutetia, Paris, City of Light]\n---\n");
        assert_eq!(meta.aliases, vec!["Lutetia", "City of Light"]);

        let meta = extract("---\naliases: Lutetia\n---\n");
        assert_eq!(meta.aliases, vec!["Lutetia"]);
    }

    #[test]
    fn test_tags_from_frontmatter_and_body() {
        let content = "---\ntags: [travel, '#europe']\n---\nTrip log #travel and #food/bakery.\n";
        let meta = extract(content);
        let tags: Vec<_> = meta.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, ["europe", "food/bakery", "travel"]);
    }

    #[rstest]
    #[case("Issue #42 is fixed", &[])]
    #[case("See https://example.com/page#section", &[])]
    #[case("A C# program", &[])]
    #[case("`#code` and #real", &["real"])]
    #[case("#start of line", &["start"])]
    #[case("(#wrapped)", &["wrapped"])]
    fn test_inline_tag_rules(#[case] body: &str, #[case] expected: &[&str]) {
        let meta = extract(body);
        let tags: Vec<_> = meta.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_tags_in_code_blocks_are_ignored() {
        let meta = extract("```sh\n# comment\necho #nope\n```\n");
        assert!(meta.tags.is_empty());
        assert!(meta.headings.is_empty());
    }

    #[test]
    fn test_headings_in_order() {
        let meta = extract("# Overview\n\ntext\n\n## Day One\n\n## Day Two\n");
        assert_eq!(meta.headings, vec!["Overview", "Day One", "Day Two"]);
    }

    #[test]
    fn test_block_ids() {
        let content = "The Louvre opens at nine. ^louvre\n\n- a list item ^item-1\n\nnot^inline\n";
        let meta = extract(content);
        let ids: Vec<_> = meta.block_ids.iter().map(String::as_str).collect();
        assert_eq!(ids, ["item-1", "louvre"]);
    }

    #[test]
    fn test_invalid_frontmatter_still_reads_body() {
        let meta = extract("---\ntitle: [broken\n---\n# Heading\n\n#tag\n");
        assert_eq!(meta.title, "Some Note");
        assert_eq!(meta.headings, vec!["Heading"]);
        let tags: Vec<_> = meta.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, ["tag"]);
    }
}
