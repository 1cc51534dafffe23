// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use localevents_config::{AppConfig, ConfigManager, ConfigManagerTrait, LoggingConfig};
use localevents_search::Facet;

use crate::commands::{Command, ConfigCommand, LinkCommand, SearchCommand};
use crate::error::CliResult;

/// localevents - federated search over the local events directory
#[derive(Parser, Debug)]
#[command(name = "localevents")]
#[command(bin_name = "localevents")]
#[command(about = "Search events, entities, series, tags and locations at once")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: <config dir>/localevents/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a search across all collections
    #[command(about = "Search all collections and print the first page of each")]
    Search {
        /// Search text; may contain created_before:/created_after: directives
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,

        /// Also match descriptions
        #[arg(long)]
        deep: bool,

        /// Load one more page of a collection (repeatable)
        #[arg(long, value_name = "FACET", value_parser = parse_facet)]
        more: Vec<Facet>,
    },

    /// Print the shareable link for a search
    #[command(about = "Print the shareable query string for a search")]
    Link {
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,

        /// Also match descriptions
        #[arg(long)]
        deep: bool,
    },

    /// Show the effective configuration
    #[command(about = "Print the effective configuration as TOML")]
    Config,
}

/// Accepts a collection name such as `events` or `locations`
pub fn parse_facet(value: &str) -> Result<Facet, String> {
    Facet::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = Facet::ALL.iter().map(|f| f.as_str()).collect();
        format!("unknown facet '{}', expected one of: {}", value, names.join(", "))
    })
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();
        let (manager, config) = Self::prepare(&cli)?;
        Self::execute(&cli, manager, config).await
    }

    /// Load configuration and install logging. When the configuration is
    /// unusable, logging still comes up at the default level so the error
    /// details reach stderr under `--verbose`.
    pub fn prepare(cli: &Cli) -> CliResult<(ConfigManager, AppConfig)> {
        match Self::load_config(cli) {
            Ok((manager, config)) => {
                crate::logging::init_logging(&config.logging.level, cli.verbose);
                Ok((manager, config))
            }
            Err(e) => {
                crate::logging::init_logging(&LoggingConfig::default().level, cli.verbose);
                Err(e)
            }
        }
    }

    /// Load configuration, honouring `--config`
    pub fn load_config(cli: &Cli) -> CliResult<(ConfigManager, AppConfig)> {
        let mut manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        let config = manager.load_config()?;
        Ok((manager, config))
    }

    /// Execute a command
    pub async fn execute(cli: &Cli, manager: ConfigManager, config: AppConfig) -> CliResult<()> {
        match &cli.command {
            Commands::Search { query, deep, more } => {
                let cmd = SearchCommand::from_config(&config, join_query(query), *deep)?
                    .with_more(more.clone());
                cmd.execute().await
            }
            Commands::Link { query, deep } => {
                let cmd = LinkCommand::new(join_query(query), *deep);
                cmd.execute().await
            }
            Commands::Config => {
                let cmd = ConfigCommand::new(config, manager.config_path().to_path_buf());
                cmd.execute().await
            }
        }
    }
}

/// Shell words back into one search string
pub fn join_query(words: &[String]) -> String {
    words.join(" ")
}
