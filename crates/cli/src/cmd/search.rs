//! Search command implementation.

use std::path::Path;

use phraselink_core::index::Match;
use phraselink_core::link::resolve_link_text;

use super::output::{print_matches_json, print_matches_table};
use super::{build_engine, load_config};
use crate::{OutputFormat, SearchArgs};

pub fn run(config: Option<&Path>, profile: Option<&str>, args: SearchArgs) {
    let rc = load_config(config, profile);
    let (engine, _) = build_engine(&rc);

    let mut results = engine.search(&args.query);
    results.truncate(args.limit);

    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_matches_table(&results),
        OutputFormat::Json => print_matches_json(&results, &args.query),
        OutputFormat::Quiet => print_results_quiet(&results, &args.query),
    }
}

/// Print the link each result would produce.
fn print_results_quiet(results: &[Match], query: &str) {
    for m in results {
        println!("{}", resolve_link_text(&m.entry, query));
    }
}

/// Resolve the output format from flags.
fn resolve_format(output: OutputFormat, json: bool, quiet: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if quiet {
        OutputFormat::Quiet
    } else {
        output
    }
}
