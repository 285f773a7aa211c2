//! Review Ingest Pipeline: validates and persists a new review
//!
//! Every accepted review is written twice: a canonical record in the
//! document store and an embedded projection in the vector index, both under
//! the same id. There is no transaction across the two writes, so a failure
//! between them leaves the review selectable by recency but not by
//! similarity.

use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::vector_index::ReviewMetadata;
use crate::providers::{DocumentStore, EmbeddingProvider, VectorIndex};
use crate::retrieval::format_review_for_embedding;
use crate::types::ReviewRecord;

/// Documented maximum review body length, enforced as a hard limit
pub const MAX_REVIEW_BODY_LENGTH: usize = 4096;

/// Documented maximum review title length, enforced as a hard limit
pub const MAX_REVIEW_TITLE_LENGTH: usize = 256;

/// A review is featured once its upvote count exceeds this threshold
pub const FEATURED_VOTE_THRESHOLD: i64 = 10;

/// Upper bound (inclusive) of the substitute upvote draw for live inserts
const UPVOTE_DRAW_MAX: i64 = 21;

/// Featured flag from an upvote count
pub fn choose_featured(num_upvotes: i64) -> i64 {
    if num_upvotes > FEATURED_VOTE_THRESHOLD {
        1
    } else {
        0
    }
}

/// Fresh globally-unique review id (128-bit randomness, hex-encoded)
pub fn generate_review_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Writes new reviews into both stores
pub struct ReviewIngestPipeline {
    store: Arc<dyn DocumentStore>,
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl ReviewIngestPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
        }
    }

    /// Validate and persist a new review, returning its generated id
    ///
    /// Rejects over-length fields and out-of-range ratings before any write.
    /// Live inserts carry no upvote data, so the featured flag comes from a
    /// uniform draw in `[1, 21]` against the same threshold the bulk loader
    /// applies to real upvote counts.
    pub async fn insert_review(
        &self,
        hotel_id: &str,
        title: &str,
        body: &str,
        rating: i64,
    ) -> Result<String> {
        validate_review_input(title, body, rating)?;

        let review_id = generate_review_id();
        let featured = choose_featured(rand::thread_rng().gen_range(1..=UPVOTE_DRAW_MAX));

        let record = ReviewRecord::new(
            review_id.clone(),
            hotel_id.to_string(),
            title.to_string(),
            body.to_string(),
            rating,
            featured,
        );
        self.store.insert_review(&record).await?;

        let text = format_review_for_embedding(title, body);
        let embedding = self.embedder.embed(&text).await?;
        let metadata = ReviewMetadata {
            hotel_id: hotel_id.to_string(),
            rating,
            title: title.to_string(),
        };
        self.index
            .insert(&review_id, &text, &metadata, &embedding)
            .await?;

        tracing::info!(hotel_id, review_id = %review_id, "Review ingested");
        Ok(review_id)
    }
}

/// Hard input validation, applied before any write
fn validate_review_input(title: &str, body: &str, rating: i64) -> Result<()> {
    if title.chars().count() > MAX_REVIEW_TITLE_LENGTH {
        return Err(Error::validation(format!(
            "Review title exceeds {} characters",
            MAX_REVIEW_TITLE_LENGTH
        )));
    }
    if body.chars().count() > MAX_REVIEW_BODY_LENGTH {
        return Err(Error::validation(format!(
            "Review body exceeds {} characters",
            MAX_REVIEW_BODY_LENGTH
        )));
    }
    if !(1..=5).contains(&rating) {
        return Err(Error::validation("Review rating must be between 1 and 5"));
    }
    Ok(())
}
