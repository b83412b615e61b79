use std::time::Duration;

use matterlist::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.ui.filter_panel_width, 34);
    assert_eq!(config.ui.detail_panel_width, 40);
    assert!(!config.ui.search_bar_visible);
    assert!(config.ui.tiles_draggable);
    assert_eq!(config.filters.debounce_delay(), Duration::from_millis(350));
    assert_eq!(config.data.page_size, 9);
    assert!(config.data.dataset_path.is_none());
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Invalid filter panel width should fail
    config.ui.filter_panel_width = 10;
    assert!(config.validate().is_err());

    // Reset and test an oversized debounce
    config.ui.filter_panel_width = 34;
    config.filters.debounce_ms = 60_000;
    assert!(config.validate().is_err());

    config.filters.debounce_ms = 350;
    config.data.page_size = 0;
    assert!(config.validate().is_err());

    config.data.page_size = 9;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("debounce_ms = 350"));
    assert!(toml_str.contains("page_size = 9"));
    assert!(!toml_str.contains("dataset_path"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[ui]
search_bar_visible = true

[data]
page_size = 12
simulated_latency_ms = 300

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert!(config.ui.search_bar_visible);
    assert_eq!(config.data.page_size, 12);
    assert_eq!(config.data.simulated_latency(), Duration::from_millis(300));
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.ui.filter_panel_width, 34);
    assert!(config.ui.tiles_draggable);
    assert_eq!(config.filters.debounce_ms, 350);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.ui.filter_panel_width, default_config.ui.filter_panel_width);
    assert_eq!(config.filters.debounce_ms, default_config.filters.debounce_ms);
    assert_eq!(config.data.page_size, default_config.data.page_size);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_load_from_file_validates() {
    let dir = std::env::temp_dir().join(format!("matterlist_test_load_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.toml");
    std::fs::write(&good, "[data]\ndataset_path = \"/tmp/matters.json\"\n").unwrap();
    let config = Config::load_from_file(&good).unwrap();
    assert_eq!(
        config.data.dataset_path.as_deref(),
        Some(std::path::Path::new("/tmp/matters.json"))
    );

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "[ui]\ndetail_panel_width = 500\n").unwrap();
    assert!(Config::load_from_file(&bad).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_generate_config_creates_directory() {
    use std::fs;

    // Create a temporary path that doesn't exist
    let temp_dir = std::env::temp_dir().join(format!("matterlist_test_config_{}", std::process::id()));
    let config_path = temp_dir.join("nested").join("config.toml");

    if temp_dir.exists() {
        let _ = fs::remove_dir_all(&temp_dir);
    }
    assert!(!temp_dir.exists());

    // Generate config should create the directory structure
    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    // The generated file parses back into a valid config
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# Matterlist Configuration File"));
    assert!(Config::load_from_file(&config_path).is_ok());

    // Clean up
    let _ = fs::remove_dir_all(&temp_dir);
}
