//! Configuration file loading with precedence handling.

use crate::action::DEFAULT_QUEUE_CAPACITY;
use crate::format::{
    FormatOptions, DEFAULT_CHAPTER_MARK, DEFAULT_MAX_CHAINED_BLANK_LINES,
    DEFAULT_MIN_PARAGRAPH_CHARS,
};
use crate::layout::Padding;
use crate::model::UnderlineMode;
use crate::viewport::ViewportStyle;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PAGEFLOW_CONFIG";

/// Environment variable overriding the underline mode.
pub const UNDERLINE_ENV: &str = "PAGEFLOW_UNDERLINE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or an unknown setting.
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
/// All fields are optional; missing ones keep their defaults.
/// Corresponds to `~/.config/pageflow/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Left and right margin around the text area.
    #[serde(default)]
    pub side_padding: Option<f32>,

    /// Top and bottom margin around the text area.
    #[serde(default)]
    pub vertical_padding: Option<f32>,

    /// Space above and below each row.
    #[serde(default)]
    pub row_padding: Option<f32>,

    /// Underline decoration: `none`, `solid` or `dashed`.
    #[serde(default)]
    pub underline: Option<UnderlineMode>,

    /// Leading indent, in reference wide glyphs.
    #[serde(default)]
    pub indent_chars: Option<usize>,

    /// Formatter: emit a paragraph once it exceeds this many code points.
    #[serde(default)]
    pub min_paragraph_chars: Option<usize>,

    /// Formatter: most consecutive blank lines kept.
    #[serde(default)]
    pub max_chained_blank_lines: Option<usize>,

    /// Glyph starting a chapter title line.
    #[serde(default)]
    pub chapter_mark: Option<char>,

    /// Marker prepended to every formatted paragraph.
    #[serde(default)]
    pub paragraph_prefix: Option<String>,

    /// Pending view actions kept before new ones are dropped.
    #[serde(default)]
    pub action_queue_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Left and right margin, in terminal cells.
    pub side_padding: f32,
    /// Top and bottom margin, in terminal cells.
    pub vertical_padding: f32,
    /// Padding above and below each row, in terminal cells.
    pub row_padding: f32,
    /// Underline decoration.
    pub underline: UnderlineMode,
    /// Leading indent, in reference wide glyphs.
    pub indent_chars: usize,
    /// Formatter minimum paragraph length.
    pub min_paragraph_chars: usize,
    /// Formatter blank line cap.
    pub max_chained_blank_lines: usize,
    /// Chapter title mark.
    pub chapter_mark: char,
    /// Paragraph prefix.
    pub paragraph_prefix: String,
    /// Action queue capacity.
    pub action_queue_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            side_padding: 2.0,
            vertical_padding: 1.0,
            row_padding: 0.0,
            underline: UnderlineMode::None,
            indent_chars: 0,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            max_chained_blank_lines: DEFAULT_MAX_CHAINED_BLANK_LINES,
            chapter_mark: DEFAULT_CHAPTER_MARK,
            paragraph_prefix: String::new(),
            action_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Margins and row padding for the viewport.
    pub fn padding(&self) -> Padding {
        Padding {
            side: self.side_padding,
            vertical: self.vertical_padding,
            row: self.row_padding,
        }
    }

    /// Viewport decoration settings.
    pub fn viewport_style(&self) -> ViewportStyle {
        ViewportStyle {
            padding: self.padding(),
            underline: self.underline,
            ..ViewportStyle::default()
        }
    }

    /// Formatter settings.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            min_paragraph_chars: self.min_paragraph_chars,
            max_chained_blank_lines: self.max_chained_blank_lines,
            chapter_mark: self.chapter_mark,
            paragraph_prefix: self.paragraph_prefix.clone(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pageflow/pageflow.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("pageflow").join("pageflow.log"),
        None => PathBuf::from("pageflow.log"),
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

/// Resolve default config file path: `~/.config/pageflow/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pageflow").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGEFLOW_CONFIG` environment variable
/// 3. Default path `~/.config/pageflow/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        side_padding: config.side_padding.unwrap_or(defaults.side_padding),
        vertical_padding: config.vertical_padding.unwrap_or(defaults.vertical_padding),
        row_padding: config.row_padding.unwrap_or(defaults.row_padding),
        underline: config.underline.unwrap_or(defaults.underline),
        indent_chars: config.indent_chars.unwrap_or(defaults.indent_chars),
        min_paragraph_chars: config
            .min_paragraph_chars
            .unwrap_or(defaults.min_paragraph_chars),
        max_chained_blank_lines: config
            .max_chained_blank_lines
            .unwrap_or(defaults.max_chained_blank_lines),
        chapter_mark: config.chapter_mark.unwrap_or(defaults.chapter_mark),
        paragraph_prefix: config.paragraph_prefix.unwrap_or(defaults.paragraph_prefix),
        action_queue_capacity: config
            .action_queue_capacity
            .unwrap_or(defaults.action_queue_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `PAGEFLOW_UNDERLINE`. Unrecognized values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(UNDERLINE_ENV) {
        match UnderlineMode::from_name(&value) {
            Some(mode) => config.underline = mode,
            None => warn!(%value, "ignoring unknown {UNDERLINE_ENV}"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are `Some`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    underline_override: Option<UnderlineMode>,
    indent_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(underline) = underline_override {
        config.underline = underline;
    }

    if let Some(indent) = indent_override {
        config.indent_chars = indent;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
