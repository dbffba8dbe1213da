//! Shared output formatting for lookup commands.

use phraselink_core::index::Match;
use phraselink_core::link::resolve_link_text;
use serde::Serialize;

/// Formatted match for JSON output.
#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub kind: &'static str,
    pub display_text: String,
    pub target: String,
    pub source_id: String,
    pub source_title: String,
    pub rank: &'static str,
    pub score: f32,
    /// Link text produced when this match is chosen.
    pub link: String,
}

impl MatchOutput {
    pub fn new(m: &Match, phrase: &str) -> Self {
        Self {
            kind: m.entry.kind.as_str(),
            display_text: m.entry.display_text.clone(),
            target: m.entry.target.clone(),
            source_id: m.entry.source_id.clone(),
            source_title: m.entry.source_title.clone(),
            rank: m.rank.as_str(),
            score: m.rank.score(),
            link: resolve_link_text(&m.entry, phrase),
        }
    }
}

/// Print matches as a table.
pub fn print_matches_table(matches: &[Match]) {
    if matches.is_empty() {
        println!("(no matches found)");
        return;
    }

    let text_width = matches
        .iter()
        .map(|m| m.entry.display_text.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 40);
    let source_width = matches
        .iter()
        .map(|m| m.entry.source_id.chars().count())
        .max()
        .unwrap_or(6)
        .clamp(6, 40);

    println!("{:<7}  {:<text_width$}  {:<source_width$}  RANK", "KIND", "TEXT", "SOURCE");
    println!("{:-<7}  {:-<text_width$}  {:-<source_width$}  {:-<6}", "", "", "", "");

    for m in matches {
        println!(
            "{:<7}  {:<text_width$}  {:<source_width$}  {}",
            m.entry.kind.as_str(),
            truncate(&m.entry.display_text, text_width),
            truncate(&m.entry.source_id, source_width),
            m.rank.as_str(),
        );
    }

    println!();
    println!("-- {} matches --", matches.len());
}

/// Print matches as JSON.
pub fn print_matches_json(matches: &[Match], phrase: &str) {
    let output: Vec<MatchOutput> = matches.iter().map(|m| MatchOutput::new(m, phrase)).collect();
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

/// Truncate string with ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
