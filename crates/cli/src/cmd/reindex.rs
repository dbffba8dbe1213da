//! Reindex command implementation.

use std::path::Path;

use phraselink_core::index::{EntryKind, IndexBuilder, LinkIndex, ProgressCallback};
use phraselink_core::vault::VaultSource;

use super::load_config;

/// Run the reindex command.
pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool) {
    let rc = load_config(config, profile);

    let source = match VaultSource::from_config(&rc) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error opening vault: {}", e);
            std::process::exit(1);
        }
    };

    println!("Indexing vault: {}", rc.vault_root.display());

    let progress: Option<ProgressCallback> = if verbose {
        Some(Box::new(|current, total, id| {
            println!("[{}/{}] {}", current, total, id);
        }))
    } else {
        None
    };

    let mut index = LinkIndex::new();
    match IndexBuilder::new(&source).full_rebuild(&mut index, progress) {
        Ok(stats) => {
            let count = |kind: EntryKind| {
                stats.by_kind.iter().find(|(k, _)| *k == kind).map_or(0, |(_, n)| *n)
            };
            println!();
            println!("Indexing complete:");
            println!("  Documents:  {}", stats.documents);
            println!("  Titles:     {}", count(EntryKind::Title));
            println!("  Headings:   {}", count(EntryKind::Heading));
            println!("  Blocks:     {}", count(EntryKind::Block));
            println!("  Tags:       {}", count(EntryKind::Tag));
            println!("  Entries:    {}", stats.entries);
            println!("  Keys:       {}", stats.keys);
            println!("  Duration:   {}ms", stats.duration_ms);
            if stats.entries == 0 {
                eprintln!("warning: no link targets found");
            }
        }
        Err(e) => {
            eprintln!("\nError during indexing: {}", e);
            std::process::exit(1);
        }
    }
}
