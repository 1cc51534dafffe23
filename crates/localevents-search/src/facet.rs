//! The five searchable collections

use std::fmt;

use serde::{Deserialize, Serialize};

/// A result section of the aggregated search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Events,
    Entities,
    Series,
    Tags,
    Locations,
}

impl Facet {
    /// All facets in display order
    pub const ALL: [Facet; 5] = [
        Facet::Events,
        Facet::Entities,
        Facet::Series,
        Facet::Tags,
        Facet::Locations,
    ];

    /// Position of the facet in [`Facet::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Events => "events",
            Facet::Entities => "entities",
            Facet::Series => "series",
            Facet::Tags => "tags",
            Facet::Locations => "locations",
        }
    }

    /// Parse a facet name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
