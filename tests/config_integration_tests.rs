//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Configuration loading and saving
//! - Default configuration generation
//! - Hand-written YAML with partial fields
//! - Settings entries derived from configuration

use armymen2_setup::{ConfigManager, SetupConfig};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_config_dir_is_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("Setup Data");

    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(manager.setup_config_path(), nested.join("Setup Config.yaml"));
}

#[test]
fn test_load_default_setup_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    // Config file doesn't exist, should return defaults
    let config = manager.load_setup_config().unwrap();

    assert_eq!(config.setup.app.app_id, "549170");
    assert_eq!(config.setup.app.executable, "ArmyMen2.exe");
    assert_eq!(config.setup.app.display_name, "Army Men II");
    assert_eq!(config.setup.width_key, "Width");
    assert_eq!(config.setup.height_key, "Height");
    assert!(config.setup.wrapper.enabled);
    assert!(config.setup.extra_settings.is_empty());
}

#[test]
fn test_save_and_load_setup_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = SetupConfig::default();
    config.setup.settings_file = "Data\\game.cfg".to_string();
    config
        .setup
        .extra_settings
        .insert("Volume".to_string(), "80".to_string());
    config.setup.wrapper.enabled = false;

    manager.save_setup_config(&config).unwrap();
    let loaded = manager.load_setup_config().unwrap();

    assert_eq!(loaded.setup.settings_file, "Data\\game.cfg");
    assert_eq!(
        loaded.setup.extra_settings.get("Volume").map(String::as_str),
        Some("80")
    );
    assert!(!loaded.setup.wrapper.enabled);
}

#[test]
fn test_hand_written_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let content = r#"
Setup:
  App ID: "299720"
  Executable: "Game.exe"
  Display Name: "Some Game"
  Settings File: "settings.txt"
  Extra Settings:
    Zeta: "1"
    Alpha: "2"
  Compatibility Layers: "~ WIN98"
  Wrapper:
    Download URL: "https://example.com/ddraw.dll"
    Config File: ""
  Debug Mode: true
"#;
    fs::write(manager.setup_config_path(), content).unwrap();

    let config = manager.load_setup_config().unwrap();
    let setup = &config.setup;

    assert_eq!(setup.app.app_id, "299720");
    assert_eq!(setup.app.executable, "Game.exe");
    assert_eq!(setup.settings_file, "settings.txt");
    assert_eq!(setup.compat_layers, "~ WIN98");
    assert!(setup.debug_mode);
    assert!(setup.wrapper.enabled);
    assert!(setup.wrapper.config_file.is_empty());
    assert_eq!(setup.wrapper.timeout_secs, 60);

    // Extra settings keep file order
    let keys: Vec<_> = setup.extra_settings.keys().cloned().collect();
    assert_eq!(keys, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_settings_entries_from_config() {
    let mut config = SetupConfig::default();
    config.setup.width_key = "ScreenWidth".to_string();
    config.setup.height_key = "ScreenHeight".to_string();

    let entries = config.setup.settings_entries(1600, 1200);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries.get("ScreenWidth").map(String::as_str), Some("1600"));
    assert_eq!(entries.get("ScreenHeight").map(String::as_str), Some("1200"));
}

#[test]
fn test_invalid_config_reports_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.setup_config_path(), "Setup:\n  Wrapper: [1, 2").unwrap();

    let err = manager.load_setup_config().unwrap_err();
    assert!(err.to_string().contains("Failed to parse setup config"));
}
