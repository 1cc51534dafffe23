//! `--config` handling

use clap::Parser;
use localevents_cli::{Cli, CommandRouter};
use tempfile::TempDir;

#[test]
fn test_config_flag_selects_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[api]\nbase_url = \"https://events.example.org/api\"\npage_size = 25\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "localevents",
        "--config",
        path.to_str().unwrap(),
        "link",
        "jazz",
    ])
    .unwrap();
    let (manager, config) = CommandRouter::load_config(&cli).unwrap();

    assert_eq!(manager.config_path(), path.as_path());
    assert_eq!(config.api.base_url, "https://events.example.org/api");
    assert_eq!(config.api.page_size, 25);
    assert_eq!(config.search.debounce_ms, 400);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[api]\npage_size = 0\n").unwrap();

    let cli = Cli::try_parse_from(["localevents", "config", "--config", path.to_str().unwrap()])
        .unwrap();
    let err = CommandRouter::load_config(&cli).unwrap_err();

    assert!(err.user_message().contains("Configuration error"));
}

#[test]
fn test_logging_installed_even_when_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[search]\ndebounce_ms = 0\n").unwrap();

    let cli = Cli::try_parse_from([
        "localevents",
        "--verbose",
        "--config",
        path.to_str().unwrap(),
        "config",
    ])
    .unwrap();

    assert!(CommandRouter::prepare(&cli).is_err());
    assert!(tracing::dispatcher::has_been_set());
}
