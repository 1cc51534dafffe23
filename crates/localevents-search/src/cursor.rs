//! Per-facet pagination cursor
//!
//! `Idle(page=1) → Loading(1) → Loaded(page, last_page) → Loading(page+1) → …`
//!
//! Pagination is append-only: the page number never goes back, and only one
//! request per facet can be outstanding.

/// Where a cursor is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStatus {
    Idle,
    Loading { page: u32 },
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    last_page: u32,
    status: CursorStatus,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            page: 1,
            // unknown until the first response arrives
            last_page: 0,
            status: CursorStatus::Idle,
        }
    }

    /// Highest page merged so far (1 before anything was loaded)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Last page reported by the API, 0 while unknown
    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    pub fn status(&self) -> CursorStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, CursorStatus::Loading { .. })
    }

    /// The API reported pages beyond the current one
    pub fn has_more(&self) -> bool {
        self.last_page > self.page
    }

    /// Whether "load more" may be offered right now
    pub fn can_load_more(&self) -> bool {
        !self.is_loading() && self.has_more()
    }

    /// The page the next request should ask for, if one may be issued.
    ///
    /// Before the first successful response that is page 1; afterwards the
    /// page after the current one, as long as the API reported it.
    pub fn next_page(&self) -> Option<u32> {
        match self.status {
            CursorStatus::Loading { .. } => None,
            _ if self.last_page == 0 => Some(1),
            _ if self.has_more() => Some(self.page + 1),
            _ => None,
        }
    }

    /// Mark `page` as requested
    pub fn start(&mut self, page: u32) {
        self.status = CursorStatus::Loading { page };
    }

    /// Record a successful response for `page`. Returns false (and changes
    /// nothing) if that page was not the one being loaded.
    pub fn complete(&mut self, page: u32, last_page: u32) -> bool {
        if self.status != (CursorStatus::Loading { page }) {
            return false;
        }
        self.page = page;
        self.last_page = last_page.max(1);
        self.status = CursorStatus::Loaded;
        true
    }

    /// Record a failed request for `page`; the current page stays put.
    pub fn fail(&mut self, page: u32) -> bool {
        if self.status != (CursorStatus::Loading { page }) {
            return false;
        }
        self.status = CursorStatus::Failed;
        true
    }
}
