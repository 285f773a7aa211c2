//! Vector index trait for similarity search over embedded review text

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata stored alongside each review embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewMetadata {
    pub hotel_id: String,
    pub rating: i64,
    pub title: String,
}

/// A similarity-search match: the stored text, its metadata, and the score
#[derive(Debug, Clone)]
pub struct ReviewMatch {
    /// Review id shared with the canonical document-store record
    pub id: String,
    /// The text as it was embedded, i.e. `"{title}: {body}"`
    pub text: String,
    pub metadata: ReviewMetadata,
    /// Similarity score, higher is more similar
    pub similarity: f32,
}

/// Trait for the nearest-neighbor index over review embeddings
///
/// One record per review id; the vector is the embedding of
/// `"{title}: {body}"`. Search is always filtered to a single hotel.
///
/// Implementations:
/// - `SqliteVectorIndex`: embedded SQLite table of embeddings
/// - `LocalVectorIndex`: in-process brute-force cosine index
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert (or replace) the embedded record for a review id
    async fn insert(
        &self,
        id: &str,
        text: &str,
        metadata: &ReviewMetadata,
        embedding: &[f32],
    ) -> Result<()>;

    /// Top-`k` matches for the query embedding among one hotel's reviews,
    /// descending similarity, unique ids
    async fn search(
        &self,
        query_embedding: &[f32],
        hotel_id: &str,
        k: usize,
    ) -> Result<Vec<ReviewMatch>>;

    /// Total number of records in the index
    async fn len(&self) -> Result<usize>;

    /// Check if the index is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Check if the index is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
