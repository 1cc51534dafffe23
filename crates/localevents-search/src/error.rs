//! Search error types

use localevents_http::HttpError;
use thiserror::Error;

use crate::facet::Facet;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by the search aggregator
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Failed to decode {collection} response: {message}")]
    Decode { collection: String, message: String },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("No further pages available for {facet}")]
    NoMorePages { facet: Facet },

    #[error("A request for {facet} is already in flight")]
    LoadInFlight { facet: Facet },
}
