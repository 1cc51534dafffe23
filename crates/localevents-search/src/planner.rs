//! Facet query planning
//!
//! Each collection accepts a slightly different filter schema, so the
//! differences are kept in one table ([`SCHEMAS`]) instead of being spread
//! through the code. Adding a collection means adding a row.

use std::fmt;

use crate::facet::Facet;
use crate::query::{DateBound, SearchQuery};

/// Sort direction accepted by the list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text filter field, and what it becomes in deep mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    pub shallow: &'static str,
    pub deep: &'static str,
}

impl TextField {
    pub fn resolve(&self, deep: bool) -> &'static str {
        if deep {
            self.deep
        } else {
            self.shallow
        }
    }
}

const NAME: TextField = TextField {
    shallow: "name",
    deep: "description",
};
const TAG: TextField = TextField {
    shallow: "tag",
    deep: "tag",
};
const ENTITY: TextField = TextField {
    shallow: "entity",
    deep: "entity",
};
// locations only understand a free-text `search` filter
const SEARCH: TextField = TextField {
    shallow: "search",
    deep: "search",
};

/// Filter schema of one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSchema {
    pub facet: Facet,
    /// Path segment of the list endpoint
    pub collection: &'static str,
    /// One sub-query is issued per text field
    pub text_fields: &'static [TextField],
    /// Whether `filters[created_at][start|end]` is accepted
    pub date_range: bool,
    pub sort: &'static str,
    pub direction: SortDirection,
}

/// Per-facet filter schemas, indexed by [`Facet::index`]
pub const SCHEMAS: [FacetSchema; 5] = [
    FacetSchema {
        facet: Facet::Events,
        collection: "events",
        text_fields: &[NAME, TAG, ENTITY],
        date_range: true,
        sort: "start_at",
        direction: SortDirection::Desc,
    },
    FacetSchema {
        facet: Facet::Entities,
        collection: "entities",
        text_fields: &[NAME],
        date_range: true,
        sort: "name",
        direction: SortDirection::Asc,
    },
    FacetSchema {
        facet: Facet::Series,
        collection: "series",
        text_fields: &[NAME],
        date_range: true,
        sort: "name",
        direction: SortDirection::Asc,
    },
    FacetSchema {
        facet: Facet::Tags,
        collection: "tags",
        text_fields: &[NAME],
        date_range: true,
        sort: "name",
        direction: SortDirection::Asc,
    },
    FacetSchema {
        facet: Facet::Locations,
        collection: "locations",
        text_fields: &[SEARCH],
        date_range: false,
        sort: "name",
        direction: SortDirection::Asc,
    },
];

/// Schema row for a facet
pub fn schema(facet: Facet) -> &'static FacetSchema {
    &SCHEMAS[facet.index()]
}

/// Inclusive creation-date window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateBound>,
    pub end: Option<DateBound>,
}

/// One request against a list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub facet: Facet,
    pub collection: &'static str,
    pub page: u32,
    pub limit: u32,
    /// `(field, value)` for `filters[field]=value`
    pub text_filter: Option<(&'static str, String)>,
    pub created_at: Option<DateRange>,
    pub sort: Option<(&'static str, SortDirection)>,
}

impl ListQuery {
    /// Query-string pairs in the API's bracketed filter notation
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some((field, value)) = &self.text_filter {
            pairs.push((format!("filters[{field}]"), value.clone()));
        }
        if let Some(range) = &self.created_at {
            if let Some(start) = &range.start {
                pairs.push((
                    "filters[created_at][start]".to_string(),
                    start.as_str().to_string(),
                ));
            }
            if let Some(end) = &range.end {
                pairs.push((
                    "filters[created_at][end]".to_string(),
                    end.as_str().to_string(),
                ));
            }
        }
        if let Some((field, direction)) = &self.sort {
            pairs.push(("sort".to_string(), field.to_string()));
            pairs.push(("direction".to_string(), direction.as_str().to_string()));
        }
        pairs
    }

    /// Value of a single query-string parameter
    pub fn param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Shorthand for `param("filters[field]")`
    pub fn filter(&self, field: &str) -> Option<String> {
        self.param(&format!("filters[{field}]"))
    }
}

/// Plan the list queries one page of `facet` needs.
///
/// An empty result means the facet has nothing to ask for (locations with no
/// name to search for).
pub fn plan(facet: Facet, query: &SearchQuery, page: u32, limit: u32) -> Vec<ListQuery> {
    let schema = schema(facet);

    let created_at = if schema.date_range && query.has_date_bounds() {
        Some(DateRange {
            start: query.created_after.clone(),
            end: query.created_before.clone(),
        })
    } else {
        None
    };

    let base = ListQuery {
        facet,
        collection: schema.collection,
        page,
        limit,
        text_filter: None,
        created_at,
        sort: Some((schema.sort, schema.direction)),
    };

    if query.name.is_empty() {
        if base.created_at.is_some() {
            return vec![base];
        }
        return Vec::new();
    }

    schema
        .text_fields
        .iter()
        .map(|field| ListQuery {
            text_filter: Some((field.resolve(query.deep), query.name.clone())),
            ..base.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(queries: &[ListQuery], key: &str) -> Vec<Option<String>> {
        queries.iter().map(|q| q.param(key)).collect()
    }

    #[test]
    fn test_schema_table_is_indexed_by_facet() {
        for facet in Facet::ALL {
            assert_eq!(schema(facet).facet, facet);
            assert_eq!(schema(facet).collection, facet.as_str());
        }
    }

    #[test]
    fn test_events_split_into_three_sub_queries() {
        let query = SearchQuery::from_input("techno CreatedAfter:2024-01-01", false);
        let queries = plan(Facet::Events, &query, 1, 10);

        assert_eq!(queries.len(), 3);
        let fields: Vec<_> = queries
            .iter()
            .map(|q| q.text_filter.as_ref().map(|(f, v)| (*f, v.as_str())))
            .collect();
        assert_eq!(
            fields,
            vec![
                Some(("name", "techno")),
                Some(("tag", "techno")),
                Some(("entity", "techno")),
            ]
        );
        assert_eq!(
            params(&queries, "filters[created_at][start]"),
            vec![Some("2024-01-01".to_string()); 3]
        );
        assert_eq!(params(&queries, "filters[created_at][end]"), vec![None, None, None]);
    }

    #[test]
    fn test_deep_mode_targets_description() {
        let query = SearchQuery::from_input("rooftop", true);

        let events = plan(Facet::Events, &query, 1, 10);
        let fields: Vec<_> = events
            .iter()
            .map(|q| q.text_filter.as_ref().map(|(f, _)| *f))
            .collect();
        assert_eq!(fields, vec![Some("description"), Some("tag"), Some("entity")]);

        for facet in [Facet::Entities, Facet::Series, Facet::Tags] {
            let queries = plan(facet, &query, 1, 10);
            assert_eq!(queries.len(), 1);
            assert_eq!(queries[0].filter("description"), Some("rooftop".to_string()));
            assert_eq!(queries[0].filter("name"), None);
        }
    }

    #[test]
    fn test_locations_use_search_without_dates() {
        let query = SearchQuery::from_input(
            "warehouse CreatedAfter:2024-01-01 CreatedBefore:2024-12-31",
            true,
        );
        let queries = plan(Facet::Locations, &query, 2, 25);

        assert_eq!(queries.len(), 1);
        let pairs = queries[0].query_pairs();
        assert!(pairs.contains(&("filters[search]".to_string(), "warehouse".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "25".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k.starts_with("filters[created_at]")));
    }

    #[test]
    fn test_date_range_on_supported_facets() {
        let query = SearchQuery::from_input(
            "zine CreatedBefore:2024-12-31 CreatedAfter:2024-01-01",
            false,
        );
        let queries = plan(Facet::Series, &query, 1, 10);
        let pairs = queries[0].query_pairs();

        assert!(pairs.contains(&(
            "filters[created_at][start]".to_string(),
            "2024-01-01".to_string()
        )));
        assert!(pairs.contains(&(
            "filters[created_at][end]".to_string(),
            "2024-12-31".to_string()
        )));
        assert!(pairs.contains(&("sort".to_string(), "name".to_string())));
        assert!(pairs.contains(&("direction".to_string(), "asc".to_string())));
    }

    #[test]
    fn test_date_only_query() {
        let query = SearchQuery::from_input("CreatedAfter:2024-05-01", false);

        let events = plan(Facet::Events, &query, 1, 10);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text_filter, None);
        assert_eq!(events[0].param("filters[created_at][start]"), Some("2024-05-01".to_string()));

        assert!(plan(Facet::Locations, &query, 1, 10).is_empty());
    }

    #[test]
    fn test_blank_query_plans_nothing() {
        let query = SearchQuery::from_input("", false);
        for facet in Facet::ALL {
            assert!(plan(facet, &query, 1, 10).is_empty());
        }
    }
}
