//! # localevents search
//!
//! Federated search over the five collections of the local-events directory
//! (events, entities, series, tags, locations).
//!
//! One free-text query fans out into per-collection list queries, each
//! collection paginates on its own cursor, pages are merged into
//! de-duplicated, order-stable accumulators, and the whole session stays in
//! step with the shareable `q`/`deep` URL parameters while the user types.
//!
//! ## Layers
//!
//! - [`query`]: raw input → [`SearchQuery`]
//! - [`planner`]: [`SearchQuery`] → per-facet [`ListQuery`] sets
//! - [`cursor`] / [`accumulator`]: per-facet pagination and merge reducer
//! - [`session`]: epoch-tagged coordinator over the five facets
//! - [`sync`]: debounced input ↔ URL reconciliation
//! - [`view`]: derived data for rendering
//! - [`controller`]: async event loop tying everything to a [`CollectionApi`]

pub mod accumulator;
pub mod api;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod facet;
pub mod planner;
pub mod query;
pub mod record;
pub mod session;
pub mod sync;
pub mod view;

pub use accumulator::{FacetAction, FacetError, FacetState};
pub use api::{CollectionApi, RestCollectionApi};
pub use controller::{Navigator, SearchController, SearchEvent, SearchHandle};
pub use cursor::{CursorStatus, PageCursor};
pub use error::{Result, SearchError};
pub use facet::Facet;
pub use planner::{FacetSchema, ListQuery, SortDirection};
pub use query::{parse, DateBound, ParsedQuery, SearchQuery};
pub use record::{Page, Record};
pub use session::{Epoch, FetchOutcome, FetchRequest, SearchSession};
pub use sync::{DebounceTicket, Debouncer, QuerySynchronizer, UrlState};
pub use view::{AggregateView, FacetView, GalleryImage};
