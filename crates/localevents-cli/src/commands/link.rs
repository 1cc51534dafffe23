// Shareable link for a search

use localevents_search::UrlState;

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Print the `?q=…` form of a search
pub struct LinkCommand {
    url: UrlState,
}

impl LinkCommand {
    pub fn new(raw_query: String, deep: bool) -> Self {
        Self {
            url: UrlState::new(raw_query.trim(), deep),
        }
    }

    pub fn link(&self) -> String {
        self.url.href()
    }
}

#[async_trait::async_trait]
impl Command for LinkCommand {
    async fn execute(&self) -> CliResult<()> {
        let link = self.link();
        if link.is_empty() {
            println!("{}", OutputStyle::default().info("Empty search, link to the bare page"));
        } else {
            println!("{}", link);
        }
        Ok(())
    }
}
