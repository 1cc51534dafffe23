//! Records and pages returned by the list endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identity as assigned by the API
pub type RecordId = u64;

/// An event, entity, series, tag or location.
///
/// Only the identity and the image references matter to the aggregator; all
/// other fields are carried through untouched for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_photo_thumbnail: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            name: None,
            primary_photo: None,
            primary_photo_thumbnail: None,
            fields: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        self.primary_photo = Some(photo.into());
        self.primary_photo_thumbnail = Some(thumbnail.into());
        self
    }

    /// Full-size image, falling back to the thumbnail
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.primary_photo).or_else(|| non_blank(&self.primary_photo_thumbnail))
    }

    /// Thumbnail, falling back to the full-size image
    pub fn thumbnail(&self) -> Option<&str> {
        non_blank(&self.primary_photo_thumbnail).or_else(|| non_blank(&self.primary_photo))
    }

    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// One page of a list endpoint: `{ data, total, last_page }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "RawPage<T>",
    bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize")
)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, last_page: u32) -> Self {
        Self {
            data,
            total,
            last_page,
        }
    }

    /// A page with no records and nothing beyond it
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 1)
    }
}

#[derive(Deserialize)]
struct RawPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    last_page: Option<u32>,
}

impl<T> From<RawPage<T>> for Page<T> {
    fn from(raw: RawPage<T>) -> Self {
        let total = raw.total.unwrap_or(raw.data.len() as u64);
        Self {
            data: raw.data,
            total,
            last_page: raw.last_page.unwrap_or(1).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_unknown_fields() {
        let record: Record = serde_json::from_value(json!({
            "id": 42,
            "name": "Basement Techno",
            "start_at": "2024-03-01T22:00:00",
            "venue": { "id": 3, "name": "The Cellar" }
        }))
        .unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.name.as_deref(), Some("Basement Techno"));
        assert_eq!(record.fields["start_at"], json!("2024-03-01T22:00:00"));
        assert_eq!(record.fields["venue"]["name"], json!("The Cellar"));
    }

    #[test]
    fn test_image_fallbacks() {
        let full = Record::new(1).with_photo("/img/1.jpg", "");
        assert_eq!(full.image(), Some("/img/1.jpg"));
        assert_eq!(full.thumbnail(), Some("/img/1.jpg"));

        let mut thumb_only = Record::new(2);
        thumb_only.primary_photo_thumbnail = Some("/img/2-t.jpg".to_string());
        assert_eq!(thumb_only.image(), Some("/img/2-t.jpg"));

        let mut blank = Record::new(3);
        blank.primary_photo = Some("  ".to_string());
        assert!(!blank.has_image());
    }

    #[test]
    fn test_page_defaults() {
        let page: Page<Record> =
            serde_json::from_value(json!({ "data": [{ "id": 1 }, { "id": 2 }] })).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.last_page, 1);

        let page: Page<Record> = serde_json::from_value(json!({
            "data": [{ "id": 1 }],
            "total": 31,
            "last_page": 4,
            "current_page": 1
        }))
        .unwrap();
        assert_eq!(page.total, 31);
        assert_eq!(page.last_page, 4);
    }

    #[test]
    fn test_zero_last_page_is_clamped() {
        let page: Page<Record> =
            serde_json::from_value(json!({ "data": [], "total": 0, "last_page": 0 })).unwrap();
        assert_eq!(page.last_page, 1);
    }
}
