//! HTTP client for the local-events directory API
//!
//! Provides a mockable, configurable HTTP client wrapper used by the search
//! aggregator to reach the upstream REST collections.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: timeouts, proxy, user agent
//! - **No hidden retries**: a failed request surfaces immediately to the caller
//! - **Testing support**: Easy mocking with wiremock

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};

/// Re-export commonly used types
pub use reqwest::{Response, StatusCode};
