//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Removes an environment variable on creation and again on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        Self(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_ends_with_pageflow_config_toml() {
    let path = default_config_path().expect("Should have default path");
    assert!(path.ends_with("pageflow/config.toml"), "got: {}", path.display());
}

#[test]
fn default_log_path_ends_with_pageflow_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("pageflow.log"), "got: {}", path.display());
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    assert_eq!(load_config_file("/nonexistent/path/to/config.toml"), Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "pageflow_test_config.toml",
        r##"
side_padding = 4.0
row_padding = 1.0
underline = "dashed"
indent_chars = 2
min_paragraph_chars = 120
max_chained_blank_lines = 1
chapter_mark = "#"
paragraph_prefix = "  "
action_queue_capacity = 32
"##,
    );

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.side_padding, Some(4.0));
    assert_eq!(config.vertical_padding, None);
    assert_eq!(config.row_padding, Some(1.0));
    assert_eq!(config.underline, Some(UnderlineMode::Dashed));
    assert_eq!(config.indent_chars, Some(2));
    assert_eq!(config.min_paragraph_chars, Some(120));
    assert_eq!(config.max_chained_blank_lines, Some(1));
    assert_eq!(config.chapter_mark, Some('#'));
    assert_eq!(config.paragraph_prefix.as_deref(), Some("  "));
    assert_eq!(config.action_queue_capacity, Some(32));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("pageflow_test_invalid.toml", "this is not valid TOML ][}{");

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "unknown keys must be rejected");
}

#[test]
fn config_file_rejects_unknown_underline_mode() {
    let result: Result<ConfigFile, _> = toml::from_str("underline = \"wavy\"");
    assert!(result.is_err());
}

#[test]
fn config_file_accepts_dash_alias() {
    let config: ConfigFile = toml::from_str("underline = \"dash\"").unwrap();
    assert_eq!(config.underline, Some(UnderlineMode::Dashed));
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_present_fields() {
    let file = ConfigFile {
        underline: Some(UnderlineMode::Solid),
        min_paragraph_chars: Some(80),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(merged.underline, UnderlineMode::Solid);
    assert_eq!(merged.min_paragraph_chars, 80);
    assert_eq!(merged.side_padding, defaults.side_padding);
    assert_eq!(merged.chapter_mark, '»');
    assert_eq!(merged.action_queue_capacity, 16);
}

#[test]
fn resolved_config_feeds_formatter_and_viewport() {
    let config = ResolvedConfig {
        paragraph_prefix: "> ".to_string(),
        underline: UnderlineMode::Dashed,
        ..ResolvedConfig::default()
    };
    let options = config.format_options();
    assert_eq!(options.paragraph_prefix, "> ");
    assert_eq!(options.min_paragraph_chars, 500);
    let style = config.viewport_style();
    assert_eq!(style.underline, UnderlineMode::Dashed);
    assert_eq!(style.padding.side, 2.0);
}

#[test]
#[serial(pageflow_underline)]
fn apply_env_overrides_respects_underline_variable() {
    let _guard = EnvGuard::new(UNDERLINE_ENV);
    env::set_var(UNDERLINE_ENV, "Solid");
    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.underline, UnderlineMode::Solid);
}

#[test]
#[serial(pageflow_underline)]
fn apply_env_overrides_ignores_unknown_underline() {
    let _guard = EnvGuard::new(UNDERLINE_ENV);
    env::set_var(UNDERLINE_ENV, "sparkly");
    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.underline, UnderlineMode::None);
}

#[test]
#[serial(pageflow_underline)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(UNDERLINE_ENV);
    assert_eq!(apply_env_overrides(ResolvedConfig::default()), ResolvedConfig::default());
}

#[test]
fn apply_cli_overrides_wins_over_file() {
    let file = ConfigFile {
        underline: Some(UnderlineMode::Solid),
        indent_chars: Some(2),
        ..ConfigFile::default()
    };
    let config = apply_cli_overrides(merge_config(Some(file)), Some(UnderlineMode::Dashed), None);
    assert_eq!(config.underline, UnderlineMode::Dashed);
    assert_eq!(config.indent_chars, 2);
}

#[test]
#[serial(pageflow_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let explicit = write_temp("pageflow_test_explicit.toml", "indent_chars = 1");
    let from_env = write_temp("pageflow_test_env.toml", "indent_chars = 9");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone())).unwrap().unwrap();
    assert_eq!(config.indent_chars, Some(1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(pageflow_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let from_env = write_temp("pageflow_test_env_only.toml", "indent_chars = 3");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.indent_chars, Some(3));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(pageflow_config)]
fn load_config_with_precedence_env_pointing_nowhere_is_defaults() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    env::set_var(CONFIG_ENV, "/nonexistent/pageflow.toml");
    assert_eq!(load_config_with_precedence(None), Ok(None));
}
