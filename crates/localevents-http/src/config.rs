//! Connection settings for the directory API client

use std::time::Duration;

/// How [`crate::HttpClient`] connects to the upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request deadline; exceeding it yields [`crate::HttpError::Timeout`]
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Route every request through this proxy
    pub proxy: Option<String>,
    /// Idle pooled connections are closed after this long
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("localevents/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}
