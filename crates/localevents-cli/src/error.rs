// CLI error types

use localevents_config::ConfigError;
use localevents_search::SearchError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<SearchError> for CliError {
    fn from(err: SearchError) -> Self {
        CliError::Search(err.to_string())
    }
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nRun 'localevents config' to check it.",
                    msg
                )
            }
            CliError::Search(msg) => {
                format!(
                    "Search failed: {}\n\nCheck that api.base_url points at a running API.",
                    msg
                )
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use localevents_search::Facet;

    #[test]
    fn test_user_message_suggests_next_step() {
        let err = CliError::Config("page_size must be greater than 0".to_string());
        let msg = err.user_message();
        assert!(msg.contains("page_size"));
        assert!(msg.contains("localevents config"));

        let err = CliError::Search("invalid base URL".to_string());
        assert!(err.user_message().contains("api.base_url"));
    }

    #[test]
    fn test_from_search_error() {
        let err: CliError = SearchError::NoMorePages {
            facet: Facet::Tags,
        }
        .into();
        assert!(matches!(err, CliError::Search(ref m) if m.contains("tags")));
    }
}
