//! Frontmatter parsing from markdown documents.

use super::types::{Frontmatter, ParsedDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` lines at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// A document without a closing delimiter has no frontmatter.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let no_frontmatter = || ParsedDocument { frontmatter: None, body: content.to_string() };

    let trimmed = content.trim_start();
    let mut lines = trimmed.split_inclusive('\n');
    let yaml_start = match lines.next() {
        Some(first) if first.trim_end() == "---" => first.len(),
        _ => return Ok(no_frontmatter()),
    };

    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml_content = &trimmed[yaml_start..offset];
            let body = trimmed[offset + line.len()..].to_string();

            let frontmatter = if yaml_content.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml_content)?
            };
            return Ok(ParsedDocument { frontmatter: Some(frontmatter), body });
        }
        offset += line.len();
    }

    Ok(no_frontmatter())
}
