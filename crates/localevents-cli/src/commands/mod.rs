// Command handlers for the localevents CLI

pub mod config;
pub mod link;
pub mod search;

pub use config::ConfigCommand;
pub use link::LinkCommand;
pub use search::SearchCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
