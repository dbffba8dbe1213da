//! Link command implementation.

use std::path::Path;

use phraselink_core::engine::LinkOutcome;

use super::{build_engine, load_config};
use crate::LinkArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: LinkArgs) {
    let rc = load_config(config, profile);
    let (engine, _) = build_engine(&rc);

    match engine.request_immediate_link(&args.at.line, args.at.cursor()) {
        LinkOutcome::Linked { phrase, entry, replacement } => {
            tracing::info!(phrase = %phrase, target = %entry.target, source = %entry.source_id, "linked");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&replacement).unwrap_or_default());
            } else if let Some(line) = replacement.apply(&args.at.line) {
                println!("{}", line);
            }
        }
        LinkOutcome::NoMatch => {
            for notice in engine.take_notices() {
                eprintln!("{}", notice);
            }
            std::process::exit(1);
        }
    }
}

