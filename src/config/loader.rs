//! Configuration file loading with precedence handling.

use crate::state::StalePolicy;
use crate::view_state::{ItemsPerPage, ViewDefaults};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LOGVIEW_CONFIG";

/// Environment variable overriding the simulated latency in milliseconds.
pub const LATENCY_ENV_VAR: &str = "LOGVIEW_LATENCY_MS";

/// Environment variable overriding the stale-result policy.
pub const STALE_RESULTS_ENV_VAR: &str = "LOGVIEW_STALE_RESULTS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/logview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Page size when the query string has no `items`.
    #[serde(default)]
    pub items_per_page: Option<usize>,

    /// Simulated latency in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Handling of superseded loads.
    #[serde(default)]
    pub stale_results: Option<StalePolicy>,

    /// JSONL record file to load instead of the bundled dataset.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Page size default.
    pub items_per_page: ItemsPerPage,
    /// Simulated latency.
    pub latency: Duration,
    /// Stale-result policy.
    pub stale_results: StalePolicy,
    /// Optional record file.
    pub data_file: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            items_per_page: ItemsPerPage::DEFAULT,
            latency: Duration::from_millis(500),
            stale_results: StalePolicy::default(),
            data_file: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Query-string defaults implied by this config.
    pub fn view_defaults(&self) -> ViewDefaults {
        ViewDefaults {
            items_per_page: self.items_per_page,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/logview/logview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("logview").join("logview.log")
    } else {
        PathBuf::from("logview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/logview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LOGVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/logview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A zero `items_per_page` falls back to the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let items_per_page = match config.items_per_page {
        None => defaults.items_per_page,
        Some(raw) => ItemsPerPage::new(raw).unwrap_or_else(|| {
            warn!(items_per_page = raw, "Ignoring non-positive items_per_page");
            defaults.items_per_page
        }),
    };

    ResolvedConfig {
        items_per_page,
        latency: config
            .latency_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.latency),
        stale_results: config.stale_results.unwrap_or(defaults.stale_results),
        data_file: config.data_file.or(defaults.data_file),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LOGVIEW_LATENCY_MS`: Override latency (ignored unless a whole number)
/// - `LOGVIEW_STALE_RESULTS`: Override stale-result policy
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(LATENCY_ENV_VAR) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.latency = Duration::from_millis(ms),
            Err(_) => warn!(value = %raw, "Ignoring invalid {}", LATENCY_ENV_VAR),
        }
    }

    if let Ok(raw) = std::env::var(STALE_RESULTS_ENV_VAR) {
        match StalePolicy::parse(raw.trim()) {
            Some(policy) => config.stale_results = policy,
            None => warn!(value = %raw, "Ignoring invalid {}", STALE_RESULTS_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    data_file_override: Option<PathBuf>,
    latency_override: Option<Duration>,
) -> ResolvedConfig {
    if let Some(data_file) = data_file_override {
        config.data_file = Some(data_file);
    }

    if let Some(latency) = latency_override {
        config.latency = latency;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
