use std::time::Duration;

use localevents_config::*;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.api.page_size, 10);
    assert_eq!(config.search.debounce_ms, 400);
    assert_eq!(config.search.debounce(), Duration::from_millis(400));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();
    let mut config = AppConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.api.page_size = 0;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.api.base_url = "not a url".to_string();
    assert!(matches!(
        manager.validate_config(&config),
        Err(ConfigError::Validation(_))
    ));

    let mut config = AppConfig::default();
    config.search.debounce_ms = 0;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(manager.validate_config(&config).is_err());
}

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::with_path(dir.path().join("absent.toml"))
        .with_env_prefix("LOCALEVENTS_TEST_MISSING");

    let config = manager.load_config().unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        concat!(
            "[api]\nbase_url = \"https://agenda.example.org/api\"\npage_size = 25\n",
            "\n[search]\ndebounce_ms = 250\n",
        ),
    )
    .unwrap();

    let mut manager = ConfigManager::with_path(path).with_env_prefix("LOCALEVENTS_TEST_PARTIAL");
    let config = manager.load_config().unwrap();

    assert_eq!(config.api.base_url, "https://agenda.example.org/api");
    assert_eq!(config.api.page_size, 25);
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.search.debounce_ms, 250);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\npage_size = 0\n").unwrap();

    let mut manager = ConfigManager::with_path(path).with_env_prefix("LOCALEVENTS_TEST_INVALID");
    assert!(manager.load_config().is_err());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let manager = ConfigManager::with_path(path.clone());

    let mut config = AppConfig::default();
    config.api.base_url = "https://events.example.net".to_string();
    config.logging.level = "debug".to_string();
    manager.save_config(&config).unwrap();

    let mut reloaded = ConfigManager::with_path(path).with_env_prefix("LOCALEVENTS_TEST_SAVE");
    assert_eq!(reloaded.load_config().unwrap(), config);
}

#[test]
fn test_http_config_mapping() {
    let mut api = ApiConfig::default();
    api.timeout_secs = 3;
    api.user_agent = Some("agenda/2".to_string());

    let http = api.http_config();
    assert_eq!(http.timeout, Duration::from_secs(3));
    assert_eq!(http.connect_timeout, Duration::from_secs(5));
    assert_eq!(http.user_agent, "agenda/2");
    assert_eq!(http.proxy, None);

    api.proxy = Some("http://proxy.internal:3128".to_string());
    assert_eq!(
        api.http_config().proxy.as_deref(),
        Some("http://proxy.internal:3128")
    );
}
