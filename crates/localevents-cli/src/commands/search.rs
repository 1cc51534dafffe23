// One-shot federated search

use std::sync::Arc;

use futures::future::join_all;
use localevents_config::AppConfig;
use localevents_search::session::execute;
use localevents_search::{
    AggregateView, CollectionApi, Facet, FacetView, RestCollectionApi, SearchQuery, SearchSession,
};
use tracing::{debug, warn};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Run a search against every collection and print the results
pub struct SearchCommand {
    api: Arc<dyn CollectionApi>,
    query: SearchQuery,
    page_size: u32,
    more: Vec<Facet>,
}

impl SearchCommand {
    pub fn new(api: Arc<dyn CollectionApi>, raw_query: &str, deep: bool, page_size: u32) -> Self {
        Self {
            api,
            query: SearchQuery::from_input(raw_query.trim(), deep),
            page_size,
            more: Vec::new(),
        }
    }

    pub fn from_config(config: &AppConfig, raw_query: String, deep: bool) -> CliResult<Self> {
        let api = RestCollectionApi::from_config(&config.api)?;
        Ok(Self::new(
            Arc::new(api),
            &raw_query,
            deep,
            config.api.page_size,
        ))
    }

    /// Facets to load one extra page of, in order
    pub fn with_more(mut self, more: Vec<Facet>) -> Self {
        self.more = more;
        self
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Load page 1 of every facet concurrently, then the requested extra
    /// pages one at a time
    pub async fn run(&self) -> AggregateView {
        let mut session = SearchSession::new(self.page_size);
        let requests = session.apply_query(self.query.clone());
        debug!(requests = requests.len(), "Running search");

        let outcomes = join_all(
            requests
                .into_iter()
                .map(|request| execute(self.api.as_ref(), request)),
        )
        .await;
        for outcome in outcomes {
            session.complete(outcome);
        }

        for facet in &self.more {
            match session.load_more(*facet) {
                Ok(request) => {
                    let outcome = execute(self.api.as_ref(), request).await;
                    session.complete(outcome);
                }
                Err(e) => warn!("{}", e),
            }
        }

        session.view()
    }

    pub fn render(&self, view: &AggregateView, style: &OutputStyle) -> String {
        let mut lines = Vec::new();

        if view.query.is_blank() {
            lines.push(style.info("Nothing to search for"));
            return lines.join("\n");
        }

        lines.push(style.header(&format!(
            "{} result(s) for \"{}\"",
            view.total_count(),
            view.query.name
        )));
        for facet in &view.facets {
            render_facet(facet, style, &mut lines);
        }
        lines.join("\n")
    }
}

fn render_facet(facet: &FacetView, style: &OutputStyle, lines: &mut Vec<String>) {
    lines.push(style.section(&format!(
        "{} ({} of {})",
        facet.facet, facet.count, facet.total
    )));

    if let Some(error) = &facet.error {
        lines.push(style.warning(error));
    }
    if facet.is_empty_result() {
        lines.push(style.info("No results"));
    }

    for record in &facet.records {
        let name = record
            .name
            .clone()
            .unwrap_or_else(|| format!("#{}", record.id));
        lines.push(style.list_item(&name));
    }

    if !facet.images.is_empty() {
        lines.push(style.key_value("images", &facet.images.len().to_string()));
    }
    if facet.has_more {
        lines.push(style.info(&format!(
            "page {} of {}, load more with --more {}",
            facet.page, facet.last_page, facet.facet
        )));
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> CliResult<()> {
        let view = self.run().await;
        println!("{}", self.render(&view, &OutputStyle::default()));
        Ok(())
    }
}
