pub mod doctor;
pub mod link;
pub mod output;
pub mod reindex;
pub mod search;
pub mod suggest;

use std::path::Path;

use phraselink_core::config::ResolvedConfig;
use phraselink_core::config::loader::ConfigLoader;
use phraselink_core::engine::{EngineConfig, LinkEngine, RebuildOutcome};
use phraselink_core::index::IndexStats;
use phraselink_core::vault::VaultSource;

/// Load configuration and start logging, exiting on failure.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            rc
        }
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Build a fresh engine over the configured vault.
pub fn build_engine(rc: &ResolvedConfig) -> (LinkEngine, IndexStats) {
    let source = match VaultSource::from_config(rc) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error opening vault: {}", e);
            std::process::exit(1);
        }
    };

    let engine = LinkEngine::new(EngineConfig::from(&rc.linker));
    match engine.rebuild_all(&source) {
        Ok(RebuildOutcome::Built(stats)) => {
            if stats.entries == 0 {
                tracing::warn!(vault = %rc.vault_root.display(), "no link targets found");
            }
            (engine, stats)
        }
        Ok(RebuildOutcome::Skipped) => (engine, IndexStats::default()),
        Err(e) => {
            eprintln!("Error during indexing: {}", e);
            std::process::exit(1);
        }
    }
}
