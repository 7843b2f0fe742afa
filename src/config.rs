//! Configuration file support for softkeeper.
//!
//! Provides JSON-based configuration through `softkeeper.config.json` files,
//! including data structures, file loading, fallback to defaults, and
//! rewriting a missing or broken file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::shared::error::SoftkeeperError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "softkeeper.config.json";

const DEFAULT_SEARCH_RESULT_LIMIT: usize = 50;
const DEFAULT_PAGE_SIZE: usize = 10;
const FALLBACK_SETUP_FILES_PATH: &str = "/var/lib/softkeeper/setups";

/// Top-level configuration file schema.
///
/// Every field has its own default, so a document that only sets
/// `catalogUrl` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding local installers
    #[serde(default = "default_setup_files_path")]
    pub setup_files_path: PathBuf,
    /// Base URL of the catalog service
    #[serde(default)]
    pub catalog_url: Option<String>,
    /// Maximum number of local search hits; 0 means unlimited
    #[serde(default = "default_search_result_limit")]
    pub search_result_limit: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            setup_files_path: default_setup_files_path(),
            catalog_url: None,
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            unknown_fields: HashMap::new(),
        }
    }
}

fn default_search_result_limit() -> usize {
    DEFAULT_SEARCH_RESULT_LIMIT
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// `%ProgramData%\Softkeeper\Setups`, or a fixed path where ProgramData is unset
pub fn default_setup_files_path() -> PathBuf {
    setup_files_path_from(std::env::var_os("ProgramData"))
}

fn setup_files_path_from(program_data: Option<OsString>) -> PathBuf {
    match program_data.filter(|value| !value.is_empty()) {
        Some(root) => PathBuf::from(root).join("Softkeeper").join("Setups"),
        None => PathBuf::from(FALLBACK_SETUP_FILES_PATH),
    }
}

/// Load config from an explicit path. Returns an error if the file is missing or malformed.
pub fn load_config_from_path(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: AppConfig = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains a valid JSON object.",
            path.display()
        )
    })?;

    if config.setup_files_path.as_os_str().is_empty() {
        config.setup_files_path = default_setup_files_path();
    }
    warn_unknown_fields(&config);

    Ok(config)
}

/// Loads the config, falling back to defaults when the file is missing or
/// malformed. The fallback is written back to `path`; a failed write is
/// logged and otherwise ignored.
pub fn load_or_default(path: &Path) -> AppConfig {
    match load_config_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default configuration");
            let config = AppConfig::default();
            if let Err(e) = save_config(path, &config) {
                tracing::warn!(path = %path.display(), error = %e, "could not rewrite configuration file");
            }
            config
        }
    }
}

/// Writes `config` to `path` as pretty-printed JSON.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| SoftkeeperError::FileWriteError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "configuration file written");
    Ok(())
}

/// Creates the setup directory when absent. Best-effort: a failure is logged.
pub fn ensure_setup_directory(path: &Path) {
    if path.is_dir() {
        return;
    }
    if let Err(e) = std::fs::create_dir_all(path) {
        tracing::warn!(path = %path.display(), error = %e, "could not create setup directory");
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &AppConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}
