//! Configuration file loading with precedence handling.

use super::{LayoutConfig, WidgetConfig};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

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

    /// A value parsed fine but violates a widget constraint.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/boardchat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pixels per animation tick.
    #[serde(default)]
    pub slide_speed: Option<i32>,

    /// Hidden offset in pixels.
    #[serde(default)]
    pub max_offset: Option<i32>,

    /// Idle time before auto-hide, in milliseconds.
    #[serde(default)]
    pub idle_timeout_ms: Option<u64>,

    /// Auto-hide after idle timeout.
    #[serde(default)]
    pub auto_hide: Option<bool>,

    /// Fraction of a scroll step needed before a drag moves the index.
    #[serde(default)]
    pub drag_hysteresis: Option<f64>,

    /// Minimum thumb size in pixels.
    #[serde(default)]
    pub min_thumb_size: Option<i32>,

    /// Margin subtracted from the log width before wrapping.
    #[serde(default)]
    pub wrap_margin: Option<i32>,

    /// Visible input line budget in pixels.
    #[serde(default)]
    pub input_budget: Option<i32>,

    /// Number of sent messages kept for recall.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Name prefixed to echoed messages.
    #[serde(default)]
    pub nick: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Terminal host: pixels per cell horizontally.
    #[serde(default)]
    pub cell_width: Option<u16>,

    /// Terminal host: pixels per cell vertically (also the line height).
    #[serde(default)]
    pub cell_height: Option<u16>,

    /// Delay between lines drip-fed from a feed file.
    #[serde(default)]
    pub feed_interval_ms: Option<u64>,

    /// Widget geometry overrides.
    #[serde(default)]
    pub layout: Option<LayoutSection>,
}

/// `[layout]` section from TOML.
///
/// ```toml
/// [layout]
/// width = 480
/// header_height = 20
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Widget width.
    #[serde(default)]
    pub width: Option<i32>,
    /// Widget height.
    #[serde(default)]
    pub height: Option<i32>,
    /// Header strip height.
    #[serde(default)]
    pub header_height: Option<i32>,
    /// Toggle button width.
    #[serde(default)]
    pub toggle_width: Option<i32>,
    /// Scrollbar width.
    #[serde(default)]
    pub scrollbar_width: Option<i32>,
    /// Arrow button height.
    #[serde(default)]
    pub button_height: Option<i32>,
    /// Input box height.
    #[serde(default)]
    pub input_height: Option<i32>,
}

impl LayoutSection {
    fn merge_into(self, defaults: LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            header_height: self.header_height.unwrap_or(defaults.header_height),
            toggle_width: self.toggle_width.unwrap_or(defaults.toggle_width),
            scrollbar_width: self.scrollbar_width.unwrap_or(defaults.scrollbar_width),
            button_height: self.button_height.unwrap_or(defaults.button_height),
            input_height: self.input_height.unwrap_or(defaults.input_height),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Widget behavior and geometry (not yet validated).
    pub widget: WidgetConfig,
    /// Name prefixed to echoed messages.
    pub nick: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Terminal host: pixels per cell horizontally.
    pub cell_width: u16,
    /// Terminal host: pixels per cell vertically.
    pub cell_height: u16,
    /// Delay between drip-fed feed lines.
    pub feed_interval_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            widget: WidgetConfig::default(),
            nick: "you".to_string(),
            log_file_path: default_log_path(),
            cell_width: 10,
            cell_height: 10,
            feed_interval_ms: 1500,
        }
    }
}

impl ResolvedConfig {
    /// Validated widget configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a widget constraint is violated or
    /// the terminal cell size is zero.
    pub fn widget_config(&self) -> Result<WidgetConfig, ConfigError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::invalid("cell_width/cell_height", "must be positive"));
        }
        self.widget.validate()?;
        Ok(self.widget.clone())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/boardchat/boardchat.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("boardchat").join("boardchat.log")
    } else {
        PathBuf::from("boardchat.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
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
/// Returns `~/.config/boardchat/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("boardchat").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `BOARDCHAT_CONFIG` environment variable
/// 3. Default path `~/.config/boardchat/config.toml`
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

    if let Ok(env_path) = std::env::var("BOARDCHAT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `BOARDCHAT_NICK`: Override nick
/// - `BOARDCHAT_AUTO_HIDE`: `1`/`true` or `0`/`false`; other values are ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(nick) = std::env::var("BOARDCHAT_NICK") {
        if !nick.trim().is_empty() {
            config.nick = nick;
        }
    }

    if let Ok(auto_hide) = std::env::var("BOARDCHAT_AUTO_HIDE") {
        if let Some(enabled) = parse_flag(&auto_hide) {
            config.widget.auto_hide_enabled = enabled;
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let widget_defaults = defaults.widget;
    let layout = config
        .layout
        .unwrap_or_default()
        .merge_into(widget_defaults.layout);

    ResolvedConfig {
        widget: WidgetConfig {
            slide_speed: config.slide_speed.unwrap_or(widget_defaults.slide_speed),
            max_offset: config.max_offset.unwrap_or(widget_defaults.max_offset),
            idle_timeout_ms: config
                .idle_timeout_ms
                .unwrap_or(widget_defaults.idle_timeout_ms),
            auto_hide_enabled: config.auto_hide.unwrap_or(widget_defaults.auto_hide_enabled),
            drag_hysteresis: config
                .drag_hysteresis
                .unwrap_or(widget_defaults.drag_hysteresis),
            min_thumb_size: config
                .min_thumb_size
                .unwrap_or(widget_defaults.min_thumb_size),
            wrap_margin: config.wrap_margin.unwrap_or(widget_defaults.wrap_margin),
            input_budget: config.input_budget.unwrap_or(widget_defaults.input_budget),
            history_capacity: config
                .history_capacity
                .unwrap_or(widget_defaults.history_capacity),
            layout,
        },
        nick: config.nick.unwrap_or(defaults.nick),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        cell_width: config.cell_width.unwrap_or(defaults.cell_width),
        cell_height: config.cell_height.unwrap_or(defaults.cell_height),
        feed_interval_ms: config.feed_interval_ms.unwrap_or(defaults.feed_interval_ms),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    nick_override: Option<String>,
    auto_hide_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(nick) = nick_override {
        config.nick = nick;
    }

    if let Some(auto_hide) = auto_hide_override {
        config.widget.auto_hide_enabled = auto_hide;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
