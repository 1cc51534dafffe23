//! Query/URL synchronization
//!
//! The search box and the URL (`?q=…&deep=true`) describe the same thing.
//! Typing updates the local buffer at once and schedules a commit; only a
//! commit rewrites the URL, and only when it actually changes it. URL changes
//! coming from outside (shared links, history navigation) flow back into the
//! buffer without bouncing another navigation.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::query::SearchQuery;

/// The only persisted search state: the `q` and `deep` URL parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UrlState {
    pub q: String,
    pub deep: bool,
}

impl UrlState {
    pub fn new(q: impl Into<String>, deep: bool) -> Self {
        Self { q: q.into(), deep }
    }

    /// Decode `q` and `deep` from a query string (leading `?` optional).
    ///
    /// Both `+` and `%20` decode to a space; `deep` is only true for the
    /// literal `true`. Undecodable input yields the empty state.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut state = UrlState::default();

        for pair in query_string.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (key, value) = match (decode(key), decode(value)) {
                (Some(key), Some(value)) => (key, value),
                _ => {
                    debug!(query_string, "Malformed URL state, treating as empty");
                    return UrlState::default();
                }
            };
            match key.as_str() {
                "q" => state.q = value,
                "deep" => state.deep = value == "true",
                _ => {}
            }
        }
        state
    }

    /// Encode as a query string without the leading `?`, omitting defaults
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if !self.q.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.q)));
        }
        if self.deep {
            params.push("deep=true".to_string());
        }
        params.join("&")
    }

    /// Relative link target: `?q=…`, or an empty string for the default state
    pub fn href(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::from_input(&self.q, self.deep)
    }
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|value| value.into_owned())
}

/// Identifies one scheduled commit. A ticket is only honoured while no newer
/// keystroke, submit or URL change has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Owns the raw input buffer, the `deep` toggle and the last committed URL
/// state.
#[derive(Debug, Clone)]
pub struct QuerySynchronizer {
    input: String,
    deep: bool,
    committed: UrlState,
    generation: u64,
    pending: bool,
}

impl QuerySynchronizer {
    /// Start from the URL the page was loaded with
    pub fn new(initial: UrlState) -> Self {
        Self {
            input: initial.q.clone(),
            deep: initial.deep,
            committed: initial,
            generation: 0,
            pending: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn deep(&self) -> bool {
        self.deep
    }

    pub fn committed(&self) -> &UrlState {
        &self.committed
    }

    /// A commit is scheduled and has not been superseded
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Keystroke: update the buffer and schedule a commit
    pub fn on_input(&mut self, text: impl Into<String>) -> DebounceTicket {
        self.input = text.into();
        self.schedule()
    }

    /// Toggle deep search; committed the same way as typing
    pub fn set_deep(&mut self, deep: bool) -> DebounceTicket {
        self.deep = deep;
        self.schedule()
    }

    /// The debounce delay for `ticket` elapsed. Returns the URL state to
    /// navigate to, if the ticket is current and the state changed.
    pub fn on_debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<UrlState> {
        if ticket.0 != self.generation || !self.pending {
            return None;
        }
        self.pending = false;
        self.commit()
    }

    /// Explicit submit: commit right away and drop any scheduled commit
    pub fn submit(&mut self) -> Option<UrlState> {
        self.cancel();
        self.commit()
    }

    /// The URL changed underneath us.
    ///
    /// Our own navigations come back here unchanged and are ignored. Anything
    /// else re-hydrates the buffer and toggle and cancels a scheduled commit.
    /// Never asks for a navigation. Returns whether local state changed.
    pub fn on_url_changed(&mut self, url: UrlState) -> bool {
        if url == self.committed {
            return false;
        }
        debug!(q = %url.q, deep = url.deep, "Re-hydrating search input from URL");
        self.cancel();
        self.input = url.q.clone();
        self.deep = url.deep;
        self.committed = url;
        true
    }

    /// Forget any scheduled commit
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    fn schedule(&mut self) -> DebounceTicket {
        self.generation += 1;
        self.pending = true;
        DebounceTicket(self.generation)
    }

    fn commit(&mut self) -> Option<UrlState> {
        let next = UrlState::new(self.input.trim(), self.deep);
        if next == self.committed {
            return None;
        }
        info!(href = %next.href(), "Committing search to URL");
        self.committed = next.clone();
        Some(next)
    }
}

/// A single cancellable delayed task.
///
/// Scheduling replaces (aborts) the previous task; dropping the debouncer
/// aborts whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            handle: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay unless superseded or cancelled first.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
