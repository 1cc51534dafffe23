// Configuration display

use std::path::PathBuf;

use localevents_config::AppConfig;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Print the effective configuration
pub struct ConfigCommand {
    config: AppConfig,
    path: PathBuf,
}

impl ConfigCommand {
    pub fn new(config: AppConfig, path: PathBuf) -> Self {
        Self { config, path }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(&self.config).map_err(|e| CliError::Internal(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let file_state = if self.path.exists() {
            "loaded"
        } else {
            "not found, using defaults"
        };

        println!("{}", style.header("localevents configuration"));
        println!(
            "{}",
            style.info(&format!("Config file: {} ({})", self.path.display(), file_state))
        );
        println!();
        println!("{}", self.to_toml()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_toml_contains_sections() {
        let cmd = ConfigCommand::new(AppConfig::default(), PathBuf::from("config.toml"));
        let toml = cmd.to_toml().unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("base_url = \"http://localhost:8000/api\""));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("debounce_ms = 400"));
    }
}
