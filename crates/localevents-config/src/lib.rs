//! localevents configuration management
//!
//! Loads the application configuration from an optional TOML file layered
//! with `LOCALEVENTS_*` environment variables, and validates it before use.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    ApiConfig, AppConfig, ConfigManager as ConfigManagerTrait, LoggingConfig, SearchConfig,
};
