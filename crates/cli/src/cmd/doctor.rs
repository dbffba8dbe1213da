use phraselink_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            tracing::debug!(profile = %rc.active_profile, "doctor");

            println!("OK   plink doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            if !rc.vault_root.is_dir() {
                println!("warning: vault_root is not a directory");
            }
            for folder in &rc.excluded_folders {
                println!("excluded: {}", folder.display());
            }
            let trigger = if rc.linker.trigger_key.is_empty() {
                "(none)"
            } else {
                rc.linker.trigger_key.as_str()
            };
            println!("linker.trigger_key: {}", trigger);
            println!("linker.debounce_ms: {}", rc.linker.debounce_ms);
            println!("linker.retry_delay_ms: {}", rc.linker.retry_delay_ms);
            println!("linker.max_init_attempts: {}", rc.linker.max_init_attempts);
        }
        Err(e) => {
            println!("FAIL plink doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
