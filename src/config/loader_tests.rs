//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_boardchat_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("boardchat") && path_str.ends_with("config.toml"),
            "Path should contain 'boardchat' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_boardchat_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("boardchat.log"),
        "Default log path should end with 'boardchat.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("boardchat_test_config.toml");

    let toml_content = r#"
slide_speed = 10
max_offset = 120
idle_timeout_ms = 3000
auto_hide = false
drag_hysteresis = 0.25
nick = "alice"

[layout]
width = 480
input_height = 20
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.slide_speed, Some(10));
    assert_eq!(config.max_offset, Some(120));
    assert_eq!(config.idle_timeout_ms, Some(3000));
    assert_eq!(config.auto_hide, Some(false));
    assert_eq!(config.drag_hysteresis, Some(0.25));
    assert_eq!(config.nick.as_deref(), Some("alice"));
    let layout = config.layout.expect("layout section present");
    assert_eq!(layout.width, Some(480));
    assert_eq!(layout.input_height, Some(20));
    assert_eq!(layout.height, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("boardchat_test_invalid.toml");
    fs::write(&config_path, "slide_speed = = 3").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should produce ParseError, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("boardchat_test_unknown.toml");
    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_partial_file_keeps_other_defaults() {
    let file = ConfigFile {
        slide_speed: Some(7),
        layout: Some(LayoutSection {
            width: Some(500),
            ..LayoutSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.widget.slide_speed, 7);
    assert_eq!(resolved.widget.max_offset, defaults.widget.max_offset);
    assert_eq!(resolved.widget.layout.width, 500);
    assert_eq!(resolved.widget.layout.height, defaults.widget.layout.height);
    assert_eq!(resolved.nick, defaults.nick);
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/chat.log");
    let file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.log_file_path, custom_path);
}

#[test]
fn widget_config_validates_merged_values() {
    let file = ConfigFile {
        max_offset: Some(500),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file));
    assert!(matches!(
        resolved.widget_config(),
        Err(ConfigError::Invalid { field: "max_offset", .. })
    ));
}

#[test]
fn widget_config_rejects_zero_cell_size() {
    let resolved = ResolvedConfig {
        cell_height: 0,
        ..ResolvedConfig::default()
    };
    assert!(resolved.widget_config().is_err());
}

#[test]
fn cli_overrides_take_precedence() {
    let resolved = apply_cli_overrides(
        ResolvedConfig::default(),
        Some("bob".to_string()),
        Some(false),
    );
    assert_eq!(resolved.nick, "bob");
    assert!(!resolved.widget.auto_hide_enabled);
}

#[test]
fn cli_overrides_none_leave_config_unchanged() {
    let resolved = apply_cli_overrides(ResolvedConfig::default(), None, None);
    assert_eq!(resolved, ResolvedConfig::default());
}

#[test]
#[serial(boardchat_env)]
fn env_overrides_nick_and_auto_hide() {
    env::set_var("BOARDCHAT_NICK", "carol");
    env::set_var("BOARDCHAT_AUTO_HIDE", "off");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("BOARDCHAT_NICK");
    env::remove_var("BOARDCHAT_AUTO_HIDE");

    assert_eq!(resolved.nick, "carol");
    assert!(!resolved.widget.auto_hide_enabled);
}

#[test]
#[serial(boardchat_env)]
fn env_override_ignores_unparseable_flag() {
    env::set_var("BOARDCHAT_AUTO_HIDE", "sometimes");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("BOARDCHAT_AUTO_HIDE");

    assert!(resolved.widget.auto_hide_enabled);
}

#[test]
#[serial(boardchat_env)]
fn precedence_prefers_explicit_path_over_env() {
    let explicit = env::temp_dir().join("boardchat_test_explicit.toml");
    let from_env = env::temp_dir().join("boardchat_test_from_env.toml");
    fs::write(&explicit, "slide_speed = 3\n").expect("write explicit");
    fs::write(&from_env, "slide_speed = 9\n").expect("write env");
    env::set_var("BOARDCHAT_CONFIG", &from_env);

    let explicit_result = load_config_with_precedence(Some(explicit.clone()));
    let env_result = load_config_with_precedence(None);

    env::remove_var("BOARDCHAT_CONFIG");
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();

    assert_eq!(explicit_result.unwrap().unwrap().slide_speed, Some(3));
    assert_eq!(env_result.unwrap().unwrap().slide_speed, Some(9));
}
