//! Config file parsing for `~/.config/whowroteit/config.toml`.
//!
//! A missing or unparsable file falls back to defaults; lookups must never
//! fail because of configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lookup::google_books::DEFAULT_BASE_URL;

pub const DEFAULT_NO_RESULTS_TEXT: &str = "No Results Found";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_print_type")]
    pub print_type: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_max_results() -> u32 {
    10
}
fn default_print_type() -> String {
    "books".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_results: default_max_results(),
            print_type: default_print_type(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_no_results_text")]
    pub no_results_text: String,
}

fn default_no_results_text() -> String {
    DEFAULT_NO_RESULTS_TEXT.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            no_results_text: default_no_results_text(),
        }
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("whowroteit");
        p.push("config.toml");
        p
    })
}

/// Load config from the default path.
pub fn load_config() -> AppConfig {
    match config_path() {
        Some(p) => load_config_from(&p),
        None => AppConfig::default(),
    }
}

/// Load config from `path`, using defaults if it is missing or invalid.
pub fn load_config_from(path: &Path) -> AppConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return AppConfig::default(),
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
            AppConfig::default()
        }
    }
}

/// Write `cfg` to `path`, creating parent directories.
pub fn save_config_to(cfg: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

/// Set a dot-separated key such as `lookup.max_results`.
pub fn set_config_key(cfg: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let parts: Vec<&str> = key.splitn(2, '.').collect();
    match parts.as_slice() {
        ["lookup", sub] => match *sub {
            "base_url" => cfg.lookup.base_url = value.to_string(),
            "max_results" => cfg.lookup.max_results = value.parse().map_err(|_| invalid())?,
            "print_type" => cfg.lookup.print_type = value.to_string(),
            "timeout_secs" => cfg.lookup.timeout_secs = value.parse().map_err(|_| invalid())?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        },
        ["display", "no_results_text"] => cfg.display.no_results_text = value.to_string(),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}
