//! Core configuration types and data structures

use std::time::Duration;

use localevents_http::HttpConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream REST API settings
    pub api: ApiConfig,
    /// Search behaviour
    pub search: SearchConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Upstream REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every collection path is resolved against
    pub base_url: String,
    /// Records requested per page (`limit`)
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// User agent override
    pub user_agent: Option<String>,
    /// HTTP(S) proxy for all API requests
    pub proxy: Option<String>,
}

/// Search behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the URL is rewritten
    pub debounce_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            page_size: 10,
            timeout_secs: 15,
            connect_timeout_secs: 5,
            user_agent: None,
            proxy: None,
        }
    }
}

impl ApiConfig {
    /// HTTP client settings derived from the API section
    pub fn http_config(&self) -> HttpConfig {
        let mut config = HttpConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent.clone());
        }
        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy.clone());
        }
        config
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 400 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> Result<AppConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
}
