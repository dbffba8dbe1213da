//! Suggest command implementation.

use std::path::Path;

use phraselink_core::engine::Suggestion;
use serde::Serialize;

use super::output::{MatchOutput, print_matches_table};
use super::{build_engine, load_config};
use crate::SuggestArgs;

/// Suggestion for JSON output.
#[derive(Debug, Serialize)]
struct SuggestionOutput<'a> {
    #[serde(flatten)]
    suggestion: &'a Suggestion,
    matches: Vec<MatchOutput>,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: SuggestArgs) {
    let rc = load_config(config, profile);
    let (engine, _) = build_engine(&rc);

    let Some(mut suggestion) = engine.request_suggestion(&args.at.line, args.at.cursor()) else {
        if args.json {
            println!("null");
        } else {
            println!("(no suggestion)");
        }
        return;
    };
    suggestion.matches.truncate(args.limit);

    if args.json {
        let output = SuggestionOutput {
            matches: suggestion
                .matches
                .iter()
                .map(|m| MatchOutput::new(m, &suggestion.phrase))
                .collect(),
            suggestion: &suggestion,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return;
    }

    println!(
        "phrase: {} [{}..{}]",
        suggestion.phrase, suggestion.replace_start, suggestion.replace_end
    );
    print_matches_table(&suggestion.matches);
    if let Some(edit) = suggestion.replacement(0)
        && let Some(line) = edit.apply(&args.at.line)
    {
        println!("first choice: {}", line);
    }
}
