//! Integration tests for loading settings from disk.

use std::fs;

use webshell_lib::config::{self, ConfigError, DEFAULT_TITLE};

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_loads_jsonc_with_comments_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.jsonc",
        r#"{
            // popover mode
            "MenuBarApp": true,
            "initialWindowWidth": 420,
            "initialWindowHeight": 640,
            "url": "https://example.com/app"
        }"#,
    );

    let (settings, loaded_from) = config::load_settings(Some(&path)).unwrap();

    assert_eq!(loaded_from, path);
    assert!(settings.menu_bar_app);
    assert_eq!(settings.initial_window_width, 420);
    assert_eq!(settings.initial_window_height, 640);
    assert_eq!(settings.url.as_str(), "https://example.com/app");
    assert_eq!(settings.title, DEFAULT_TITLE);
    assert!(settings.show_notifications);
}

#[test]
fn test_missing_custom_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.jsonc");

    let err = config::load_settings(Some(&path)).unwrap_err();

    assert!(matches!(&err, ConfigError::NotFoundAt(missing) if *missing == path));
    assert!(err.to_string().contains("nope.jsonc"));
    assert!(!path.exists(), "no template is written for an explicit path");
}

#[test]
fn test_missing_required_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.json",
        r#"{ "MenuBarApp": false, "initialWindowWidth": 800, "url": "https://example.com" }"#,
    );

    let err = config::load_settings(Some(&path)).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("initialWindowHeight"));
}

#[test]
fn test_wrong_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.json",
        r#"{ "MenuBarApp": "yes", "initialWindowWidth": 800, "initialWindowHeight": 600, "url": "https://example.com" }"#,
    );

    assert!(matches!(config::load_settings(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn test_zero_dimension_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.json",
        r#"{ "MenuBarApp": false, "initialWindowWidth": 0, "initialWindowHeight": 600, "url": "https://example.com" }"#,
    );

    let err = config::load_settings(Some(&path)).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { key: "initialWindowWidth", .. }));
}

#[test]
fn test_template_loads_as_valid_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.jsonc");

    config::template::create_config_file(&path).unwrap();
    let (settings, _) = config::load_settings(Some(&path)).unwrap();

    assert!(!settings.menu_bar_app);
    assert_eq!(settings.content_size().width, settings.initial_window_width);
}
