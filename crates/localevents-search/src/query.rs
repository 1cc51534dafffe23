//! Free-text query parsing
//!
//! The search box accepts plain words plus two positional directives,
//! `CreatedBefore:<date>` and `CreatedAfter:<date>`. Directives are matched
//! case-insensitively and only when they carry a value; everything else is
//! part of the name filter.

use std::fmt;

use serde::{Deserialize, Serialize};

const CREATED_BEFORE: &str = "createdbefore";
const CREATED_AFTER: &str = "createdafter";

/// A creation-date bound, forwarded to the API verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateBound(String);

impl DateBound {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of parsing the raw input, before the `deep` toggle is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub name: String,
    pub created_before: Option<DateBound>,
    pub created_after: Option<DateBound>,
}

/// Parse raw search input.
///
/// Tokens are split on whitespace and rejoined with single spaces. A repeated
/// directive keeps its last value.
pub fn parse(raw: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    let mut name_tokens = Vec::new();

    for token in raw.split_whitespace() {
        match directive(token) {
            Some(Directive::Before(value)) => parsed.created_before = Some(DateBound::new(value)),
            Some(Directive::After(value)) => parsed.created_after = Some(DateBound::new(value)),
            None => name_tokens.push(token),
        }
    }

    parsed.name = name_tokens.join(" ");
    parsed
}

enum Directive<'a> {
    Before(&'a str),
    After(&'a str),
}

fn directive(token: &str) -> Option<Directive<'_>> {
    let (key, value) = token.split_once(':')?;
    if value.is_empty() {
        return None;
    }
    match key.to_ascii_lowercase().as_str() {
        CREATED_BEFORE => Some(Directive::Before(value)),
        CREATED_AFTER => Some(Directive::After(value)),
        _ => None,
    }
}

/// The effective query a search session runs.
///
/// Two queries are equal exactly when they would send the same filters, so
/// `"techno "` and `"techno"` compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateBound>,
    #[serde(default)]
    pub deep: bool,
}

impl SearchQuery {
    pub fn from_input(raw: &str, deep: bool) -> Self {
        let parsed = parse(raw);
        Self {
            name: parsed.name,
            created_before: parsed.created_before,
            created_after: parsed.created_after,
            deep,
        }
    }

    pub fn has_date_bounds(&self) -> bool {
        self.created_before.is_some() || self.created_after.is_some()
    }

    /// Nothing to search for: no name and no date bounds
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && !self.has_date_bounds()
    }
}
