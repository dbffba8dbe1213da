use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub linker: LinkerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Folders to exclude from indexing (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
}

/// Settings of the phrase linker.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Text that must be typed right before the cursor for suggestions to
    /// fire. Empty: suggest on every request.
    #[serde(default)]
    pub trigger_key: String,
    /// Coalescing window for change events of one note (default: 300)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Delay before retrying an empty startup build (default: 2000)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Startup build attempts including the first (default: 2)
    #[serde(default = "default_max_init_attempts")]
    pub max_init_attempts: u32,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            trigger_key: String::new(),
            debounce_ms: default_debounce_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_init_attempts: default_max_init_attempts(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_max_init_attempts() -> u32 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    /// Folders to exclude from indexing (resolved to absolute paths).
    pub excluded_folders: Vec<PathBuf>,
    pub linker: LinkerConfig,
    pub logging: LoggingConfig,
}
