//! Render model derived from the session
//!
//! Nothing here holds state of its own: a view is rebuilt from the facet
//! states every time one of them changes.

use serde::Serialize;

use crate::accumulator::FacetState;
use crate::cursor::CursorStatus;
use crate::facet::Facet;
use crate::query::SearchQuery;
use crate::record::{Record, RecordId};
use crate::session::{Epoch, SearchSession};

/// An image entry for the gallery/lightbox of a facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    /// Position within the facet's image list
    pub index: usize,
    pub record_id: RecordId,
    pub url: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetView {
    pub facet: Facet,
    pub records: Vec<Record>,
    /// Records accumulated so far
    pub count: usize,
    /// Matches reported by the API
    pub total: u64,
    pub page: u32,
    pub last_page: u32,
    pub has_more: bool,
    pub can_load_more: bool,
    pub loading: bool,
    /// Present when the latest load of this section failed
    pub error: Option<String>,
    pub images: Vec<GalleryImage>,
    #[serde(skip)]
    settled: bool,
}

impl FacetView {
    pub fn derive(state: &FacetState) -> Self {
        let records: Vec<Record> = state.records().cloned().collect();
        let images = gallery(&records);
        let cursor = state.cursor();

        Self {
            facet: state.facet(),
            count: records.len(),
            records,
            total: state.total(),
            page: cursor.page(),
            last_page: cursor.last_page(),
            has_more: cursor.has_more(),
            can_load_more: cursor.can_load_more(),
            loading: cursor.is_loading(),
            error: state.error().map(|e| e.to_string()),
            images,
            settled: cursor.status() == CursorStatus::Loaded,
        }
    }

    /// Loaded successfully and matched nothing. Not an error.
    pub fn is_empty_result(&self) -> bool {
        self.settled && self.count == 0 && self.error.is_none()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

fn gallery(records: &[Record]) -> Vec<GalleryImage> {
    records
        .iter()
        .filter_map(|record| Some((record, record.image()?, record.thumbnail()?)))
        .enumerate()
        .map(|(index, (record, url, thumbnail))| GalleryImage {
            index,
            record_id: record.id,
            url: url.to_string(),
            thumbnail: thumbnail.to_string(),
        })
        .collect()
}

/// Everything the presentation layer needs for one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    pub query: SearchQuery,
    #[serde(skip)]
    pub epoch: Epoch,
    /// One entry per facet, in [`Facet::ALL`] order
    pub facets: Vec<FacetView>,
}

impl AggregateView {
    pub fn derive(session: &SearchSession) -> Self {
        Self {
            query: session.query().clone(),
            epoch: session.epoch(),
            facets: session.facets().iter().map(FacetView::derive).collect(),
        }
    }

    pub fn facet(&self, facet: Facet) -> &FacetView {
        &self.facets[facet.index()]
    }

    /// Records accumulated across all facets
    pub fn total_count(&self) -> usize {
        self.facets.iter().map(|f| f.count).sum()
    }

    pub fn is_loading(&self) -> bool {
        self.facets.iter().any(|f| f.loading)
    }
}

impl Default for AggregateView {
    fn default() -> Self {
        Self::derive(&SearchSession::new(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::{FacetAction, FacetError};
    use crate::record::Page;

    fn loaded(facet: Facet, records: Vec<Record>, last_page: u32) -> FacetState {
        let mut state = FacetState::new(facet);
        state.reduce(FacetAction::LoadStarted { page: 1 });
        let total = records.len() as u64 * last_page as u64;
        state.reduce(FacetAction::PageLoaded {
            page: 1,
            page_data: Page::new(records, total, last_page),
        });
        state
    }

    #[test]
    fn test_counts_and_flags() {
        let state = loaded(Facet::Entities, vec![Record::new(1), Record::new(2)], 3);
        let view = FacetView::derive(&state);

        assert_eq!(view.count, 2);
        assert_eq!(view.total, 6);
        assert!(view.has_more);
        assert!(view.can_load_more);
        assert!(!view.loading);
        assert!(!view.is_empty_result());
    }

    #[test]
    fn test_images_are_indexed_in_record_order() {
        let records = vec![
            Record::new(10).with_photo("/p/10.jpg", "/t/10.jpg"),
            Record::new(11),
            Record::new(12).with_photo("/p/12.jpg", ""),
        ];
        let view = FacetView::derive(&loaded(Facet::Events, records, 1));

        assert_eq!(
            view.images,
            vec![
                GalleryImage {
                    index: 0,
                    record_id: 10,
                    url: "/p/10.jpg".to_string(),
                    thumbnail: "/t/10.jpg".to_string(),
                },
                GalleryImage {
                    index: 1,
                    record_id: 12,
                    url: "/p/12.jpg".to_string(),
                    thumbnail: "/p/12.jpg".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let view = FacetView::derive(&loaded(Facet::Tags, Vec::new(), 1));
        assert!(view.is_empty_result());
        assert!(!view.failed());

        let idle = FacetView::derive(&FacetState::new(Facet::Tags));
        assert!(!idle.is_empty_result());
    }

    #[test]
    fn test_failed_section() {
        let mut state = FacetState::new(Facet::Series);
        state.reduce(FacetAction::LoadStarted { page: 1 });
        state.reduce(FacetAction::LoadFailed {
            page: 1,
            error: FacetError::Network {
                facet: Facet::Series,
                message: "HTTP 502".to_string(),
            },
        });
        let view = FacetView::derive(&state);

        assert!(view.failed());
        assert!(!view.is_empty_result());
        assert_eq!(view.error.as_deref(), Some("failed to load series: HTTP 502"));
    }

    #[test]
    fn test_aggregate_view_covers_all_facets() {
        let view = AggregateView::default();
        assert_eq!(view.facets.len(), 5);
        for facet in Facet::ALL {
            assert_eq!(view.facet(facet).facet, facet);
        }
        assert_eq!(view.total_count(), 0);
        assert!(!view.is_loading());
    }
}
