//! Review types: the wire shape and the canonical store record

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A review as it travels over the wire and between core components
///
/// Absent fields fall back to the same defaults the bulk loader applies to
/// incomplete CSV rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelReview {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_body")]
    pub body: String,
    /// Integer rating, 1-5
    #[serde(default = "default_rating")]
    pub rating: i64,
    #[serde(default)]
    pub id: String,
}

fn default_title() -> String {
    "Review".to_string()
}

fn default_body() -> String {
    "(empty review)".to_string()
}

fn default_rating() -> i64 {
    5
}

/// Canonical review record as persisted in the document store
///
/// The same id also addresses the derived text-embedding record in the
/// vector index; the two are written independently and must be kept
/// mutually consistent by the ingest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    pub id: String,
    pub hotel_id: String,
    pub title: String,
    pub body: String,
    pub rating: i64,
    /// Unix seconds
    pub date_added: i64,
    /// Boolean-as-integer featured flag (0 or 1)
    pub featured: i64,
}

impl ReviewRecord {
    /// Fresh record stamped with the current time
    pub fn new(
        id: String,
        hotel_id: String,
        title: String,
        body: String,
        rating: i64,
        featured: i64,
    ) -> Self {
        Self {
            id,
            hotel_id,
            title,
            body,
            rating,
            date_added: Utc::now().timestamp(),
            featured,
        }
    }

    /// Wire representation of this record
    pub fn to_review(&self) -> HotelReview {
        HotelReview {
            title: self.title.clone(),
            body: self.body.clone(),
            rating: self.rating,
            id: self.id.clone(),
        }
    }
}
