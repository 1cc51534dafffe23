//! Per-facet result accumulation
//!
//! Each facet is a small reducer: actions come in from the session, the
//! state only ever grows until a [`FacetAction::Reset`]. Records are keyed by
//! id and kept in the order their id was first seen.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::cursor::PageCursor;
use crate::facet::Facet;
use crate::record::{Page, Record, RecordId};

/// Why a facet failed to load. Kept per facet; never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacetError {
    #[error("failed to load {facet}: {message}")]
    Network { facet: Facet, message: String },
}

/// Inputs to [`FacetState::reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum FacetAction {
    /// Drop everything and go back to page 1
    Reset,
    LoadStarted { page: u32 },
    PageLoaded { page: u32, page_data: Page<Record> },
    LoadFailed { page: u32, error: FacetError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetState {
    facet: Facet,
    cursor: PageCursor,
    accumulated: IndexMap<RecordId, Record>,
    total: u64,
    error: Option<FacetError>,
}

impl FacetState {
    pub fn new(facet: Facet) -> Self {
        Self {
            facet,
            cursor: PageCursor::new(),
            accumulated: IndexMap::new(),
            total: 0,
            error: None,
        }
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn page(&self) -> u32 {
        self.cursor.page()
    }

    pub fn last_page(&self) -> u32 {
        self.cursor.last_page()
    }

    pub fn is_loading(&self) -> bool {
        self.cursor.is_loading()
    }

    /// Total matches as reported by the API on the latest page
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn error(&self) -> Option<&FacetError> {
        self.error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.accumulated.contains_key(&id)
    }

    /// Accumulated records in first-seen order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.accumulated.values()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.accumulated.keys().copied().collect()
    }

    /// Identity-keyed union of `records` into the accumulated set.
    ///
    /// New ids are appended. An id that is already present keeps its
    /// position; its stored copy is replaced by the incoming one (last write
    /// wins). Returns how many new ids were added.
    pub fn merge<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let before = self.accumulated.len();
        for record in records {
            self.accumulated.insert(record.id, record);
        }
        self.accumulated.len() - before
    }

    /// Apply an action. Returns false when the action did not fit the
    /// current state and was ignored.
    pub fn reduce(&mut self, action: FacetAction) -> bool {
        match action {
            FacetAction::Reset => {
                *self = FacetState::new(self.facet);
                true
            }
            FacetAction::LoadStarted { page } => {
                if self.cursor.is_loading() {
                    return false;
                }
                self.cursor.start(page);
                true
            }
            FacetAction::PageLoaded { page, page_data } => {
                if !self.cursor.complete(page, page_data.last_page) {
                    return false;
                }
                let added = self.merge(page_data.data);
                self.total = page_data.total;
                self.error = None;
                debug!(
                    facet = %self.facet,
                    page,
                    added,
                    accumulated = self.accumulated.len(),
                    "Merged page"
                );
                true
            }
            FacetAction::LoadFailed { page, error } => {
                if !self.cursor.fail(page) {
                    return false;
                }
                self.error = Some(error);
                true
            }
        }
    }
}
