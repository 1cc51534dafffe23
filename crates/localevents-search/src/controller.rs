//! Async search controller
//!
//! A single event loop owns the synchronizer, the session and the debounce
//! timer. Everything else talks to it through [`SearchHandle`] messages, and
//! observes it through a `watch` channel of [`AggregateView`]s.

use std::sync::Arc;
use std::time::Duration;

use localevents_config::AppConfig;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::api::CollectionApi;
use crate::facet::Facet;
use crate::session::{execute, FetchOutcome, FetchRequest, SearchSession};
use crate::sync::{DebounceTicket, Debouncer, QuerySynchronizer, UrlState};
use crate::view::AggregateView;

/// The routing layer: rewrites the browser URL
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &UrlState);
}

/// Messages understood by [`SearchController::run`]
#[derive(Debug)]
pub enum SearchEvent {
    Input(String),
    SetDeep(bool),
    Submit,
    /// The URL changed (history navigation, shared link, or our own echo)
    UrlChanged(UrlState),
    LoadMore(Facet),
    DebounceElapsed(DebounceTicket),
    FetchCompleted(FetchOutcome),
    Shutdown,
}

/// Cloneable sender side of a running controller
#[derive(Debug, Clone)]
pub struct SearchHandle {
    tx: mpsc::UnboundedSender<SearchEvent>,
}

impl SearchHandle {
    /// Send an event; false once the controller has stopped
    pub fn send(&self, event: SearchEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn input(&self, text: impl Into<String>) -> bool {
        self.send(SearchEvent::Input(text.into()))
    }

    pub fn set_deep(&self, deep: bool) -> bool {
        self.send(SearchEvent::SetDeep(deep))
    }

    pub fn submit(&self) -> bool {
        self.send(SearchEvent::Submit)
    }

    pub fn url_changed(&self, url: UrlState) -> bool {
        self.send(SearchEvent::UrlChanged(url))
    }

    pub fn load_more(&self, facet: Facet) -> bool {
        self.send(SearchEvent::LoadMore(facet))
    }

    pub fn shutdown(&self) -> bool {
        self.send(SearchEvent::Shutdown)
    }
}

/// Controller tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub debounce: Duration,
    pub page_size: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(400),
            page_size: 10,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            debounce: config.search.debounce(),
            page_size: config.api.page_size,
        }
    }
}

pub struct SearchController {
    state: ControllerState,
    commands_tx: mpsc::UnboundedSender<SearchEvent>,
    commands_rx: mpsc::UnboundedReceiver<SearchEvent>,
    internal_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

/// Everything the event loop mutates. Debounce and fetch tasks report back
/// on `internal_tx`, which never keeps the command channel open.
struct ControllerState {
    api: Arc<dyn CollectionApi>,
    navigator: Arc<dyn Navigator>,
    sync: QuerySynchronizer,
    session: SearchSession,
    debouncer: Debouncer,
    internal_tx: mpsc::UnboundedSender<SearchEvent>,
    view_tx: watch::Sender<AggregateView>,
}

impl SearchController {
    /// Create a controller for a page loaded at `initial`. Nothing is
    /// fetched until [`SearchController::run`] starts.
    pub fn new(
        api: Arc<dyn CollectionApi>,
        navigator: Arc<dyn Navigator>,
        options: ControllerOptions,
        initial: UrlState,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let session = SearchSession::new(options.page_size);
        let (view_tx, _) = watch::channel(session.view());

        Self {
            state: ControllerState {
                api,
                navigator,
                sync: QuerySynchronizer::new(initial),
                session,
                debouncer: Debouncer::new(options.debounce),
                internal_tx,
                view_tx,
            },
            commands_tx,
            commands_rx,
            internal_rx,
        }
    }

    /// Handles must be taken before [`SearchController::run`]; the loop
    /// stops once the last one is dropped.
    pub fn handle(&self) -> SearchHandle {
        SearchHandle {
            tx: self.commands_tx.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AggregateView> {
        self.state.view_tx.subscribe()
    }

    pub fn session(&self) -> &SearchSession {
        &self.state.session
    }

    pub fn synchronizer(&self) -> &QuerySynchronizer {
        &self.state.sync
    }

    /// Process events until [`SearchEvent::Shutdown`] or until every
    /// [`SearchHandle`] is gone. A pending debounce is cancelled on exit.
    pub async fn run(self) {
        let SearchController {
            mut state,
            commands_tx,
            mut commands_rx,
            mut internal_rx,
        } = self;
        drop(commands_tx);

        let initial = state.sync.committed().clone();
        state.apply_url(&initial);

        loop {
            let event = tokio::select! {
                command = commands_rx.recv() => match command {
                    Some(event) => event,
                    None => {
                        debug!("All search handles dropped");
                        break;
                    }
                },
                Some(event) = internal_rx.recv() => event,
            };
            if !state.handle_event(event) {
                break;
            }
        }
        state.debouncer.cancel();
        debug!("Search controller stopped");
    }
}

impl ControllerState {
    fn handle_event(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Input(text) => {
                let ticket = self.sync.on_input(text);
                self.schedule_commit(ticket);
            }
            SearchEvent::SetDeep(deep) => {
                let ticket = self.sync.set_deep(deep);
                self.schedule_commit(ticket);
            }
            SearchEvent::Submit => {
                self.debouncer.cancel();
                if let Some(url) = self.sync.submit() {
                    self.navigate(url);
                }
            }
            SearchEvent::DebounceElapsed(ticket) => {
                if let Some(url) = self.sync.on_debounce_elapsed(ticket) {
                    self.navigate(url);
                }
            }
            SearchEvent::UrlChanged(url) => {
                if self.sync.on_url_changed(url.clone()) {
                    self.debouncer.cancel();
                }
                self.apply_url(&url);
            }
            SearchEvent::LoadMore(facet) => match self.session.load_more(facet) {
                Ok(request) => {
                    self.spawn_fetch(request);
                    self.publish();
                }
                Err(e) => debug!("Load more ignored: {}", e),
            },
            SearchEvent::FetchCompleted(outcome) => {
                if self.session.complete(outcome) {
                    self.publish();
                }
            }
            SearchEvent::Shutdown => return false,
        }
        true
    }

    fn schedule_commit(&mut self, ticket: DebounceTicket) {
        let tx = self.internal_tx.clone();
        self.debouncer.schedule(async move {
            let _ = tx.send(SearchEvent::DebounceElapsed(ticket));
        });
    }

    fn navigate(&mut self, url: UrlState) {
        info!(href = %url.href(), "Navigating");
        self.navigator.navigate(&url);
        // the router echoes this back as UrlChanged, which is then a no-op
        self.apply_url(&url);
    }

    fn apply_url(&mut self, url: &UrlState) {
        let requests = self.session.apply_url(url);
        for request in requests {
            self.spawn_fetch(request);
        }
        self.publish();
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let outcome = execute(api.as_ref(), request).await;
            let _ = tx.send(SearchEvent::FetchCompleted(outcome));
        });
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.session.view());
    }
}
