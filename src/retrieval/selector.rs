//! Review Selector: chooses the review set backing a hotel summary
//!
//! Two modes: general (recent reviews plus a featured boost, straight from
//! the document store) and personalized (similarity search against the
//! vector index using the user's travel profile summary as the query).

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::{DocumentStore, EmbeddingProvider, VectorIndex};
use crate::types::HotelReview;

/// How many reviews each general-selection scan pulls
pub const GENERAL_REVIEW_SCAN_LIMIT: usize = 3;

/// How many reviews personalized selection returns
pub const PERSONALIZED_REVIEW_COUNT: usize = 3;

/// Personalization query used when a user has no profile or no summary yet
///
/// Must stay non-empty so similarity search always has a valid query.
pub const DEFAULT_TRAVEL_PROFILE_SUMMARY: &str =
    "I am looking for a comfortable, clean hotel in a convenient location, \
     with friendly staff and good value for money.";

/// Format review text the way it is stored in the vector index
pub fn format_review_for_embedding(title: &str, body: &str) -> String {
    format!("{}: {}", title, body)
}

/// Recover the review body from indexed text
///
/// The index stores `"{title}: {body}"` and no separate body field, so the
/// text must begin with the trimmed title followed by the `:` separator;
/// everything after the separator, trimmed, is the body. Returns `None` when
/// the text does not match that shape.
pub fn extract_review_body(text: &str, title: &str) -> Option<String> {
    let title = title.trim();
    let rest = text.strip_prefix(title)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim().to_string())
}

/// Selects the reviews that feed the summarization prompts
pub struct ReviewSelector {
    store: Arc<dyn DocumentStore>,
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl ReviewSelector {
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

    /// Generally interesting reviews for a hotel: the 3 most recent plus the
    /// 3 most recent featured, merged by id in insertion order
    ///
    /// Returns between 0 and 6 reviews; a hotel with no reviews yields an
    /// empty list, not an error. This is the cold-start-safe fallback when
    /// personalization has nothing to work with.
    pub async fn general_reviews(&self, hotel_id: &str) -> Result<Vec<HotelReview>> {
        let recent = self
            .store
            .recent_reviews(hotel_id, GENERAL_REVIEW_SCAN_LIMIT)
            .await?;
        let featured = self
            .store
            .recent_featured_reviews(hotel_id, GENERAL_REVIEW_SCAN_LIMIT)
            .await?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::with_capacity(recent.len() + featured.len());
        for review in recent.into_iter().chain(featured) {
            if seen.insert(review.id.clone()) {
                merged.push(review);
            }
        }

        tracing::debug!(hotel_id, count = merged.len(), "Selected general reviews");
        Ok(merged)
    }

    /// Reviews most relevant to a user's travel profile summary
    ///
    /// Embeds the summary, runs a hotel-filtered similarity search with
    /// k = 3, and maps each match back to a review. The match text carries
    /// `"{title}: {body}"`, so the body is recovered by stripping the stored
    /// title; a record that fails that parse keeps its full text as the body.
    pub async fn reviews_for_user(
        &self,
        hotel_id: &str,
        user_travel_profile_summary: &str,
    ) -> Result<Vec<HotelReview>> {
        let query_embedding = self.embedder.embed(user_travel_profile_summary).await?;

        let matches = self
            .index
            .search(&query_embedding, hotel_id, PERSONALIZED_REVIEW_COUNT)
            .await?;

        let reviews = matches
            .into_iter()
            .map(|m| {
                let body = match extract_review_body(&m.text, &m.metadata.title) {
                    Some(body) => body,
                    None => {
                        tracing::warn!(
                            review_id = %m.id,
                            "Indexed review text does not start with its title"
                        );
                        m.text.trim().to_string()
                    }
                };
                HotelReview {
                    title: m.metadata.title.trim().to_string(),
                    body,
                    rating: m.metadata.rating,
                    id: m.id,
                }
            })
            .collect();

        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::providers::local::LocalVectorIndex;
    use crate::providers::vector_index::ReviewMetadata;
    use crate::storage::SqliteDocumentStore;
    use crate::types::ReviewRecord;

    /// Deterministic embedder: maps known phrases to fixed directions
    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let vector = if text.contains("pool") {
                vec![1.0, 0.0, 0.0]
            } else if text.contains("quiet") {
                vec![0.0, 1.0, 0.0]
            } else {
                vec![0.0, 0.0, 1.0]
            };
            Ok(vector)
        }

        fn dimensions(&self) -> usize {
            3
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn record(id: &str, hotel_id: &str, date_added: i64, featured: i64) -> ReviewRecord {
        ReviewRecord {
            id: id.to_string(),
            hotel_id: hotel_id.to_string(),
            title: format!("Title {}", id),
            body: format!("Body {}", id),
            rating: 4,
            date_added,
            featured,
        }
    }

    async fn selector_with_store() -> (ReviewSelector, Arc<SqliteDocumentStore>) {
        let store = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        let index = Arc::new(LocalVectorIndex::new());
        let selector = ReviewSelector::new(store.clone(), index, Arc::new(StubEmbedder));
        (selector, store)
    }

    #[test]
    fn format_and_extract_round_trip() {
        let text = format_review_for_embedding("Great pool", "  We loved it.  ");
        assert_eq!(text, "Great pool:   We loved it.  ");
        assert_eq!(
            extract_review_body(&text, "Great pool").as_deref(),
            Some("We loved it.")
        );
        // Trimmed title is matched even when the stored title has padding
        assert_eq!(
            extract_review_body("Great pool: fun", " Great pool ").as_deref(),
            Some("fun")
        );
        // Text not starting with the title fails the parse
        assert!(extract_review_body("Something else entirely", "Great pool").is_none());
    }

    #[tokio::test]
    async fn empty_hotel_yields_empty_list() {
        let (selector, _store) = selector_with_store().await;
        let reviews = selector.general_reviews("h1").await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn general_selection_deduplicates_across_scans() {
        let (selector, store) = selector_with_store().await;

        // Two reviews, both recent and both featured: must appear once each
        store.insert_review(&record("r1", "h1", 100, 1)).await.unwrap();
        store.insert_review(&record("r2", "h1", 200, 1)).await.unwrap();

        let reviews = selector.general_reviews("h1").await.unwrap();
        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn general_selection_three_review_scenario() {
        let (selector, store) = selector_with_store().await;

        // recent-3 picks r3, r2, r1; featured-3 picks r3, r2; dedup -> 3
        store.insert_review(&record("r1", "h1", 100, 0)).await.unwrap();
        store.insert_review(&record("r2", "h1", 200, 1)).await.unwrap();
        store.insert_review(&record("r3", "h1", 300, 1)).await.unwrap();

        let reviews = selector.general_reviews("h1").await.unwrap();
        assert_eq!(reviews.len(), 3);
        let ids: HashSet<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["r1", "r2", "r3"]));
    }

    #[tokio::test]
    async fn general_selection_is_bounded_at_six() {
        let (selector, store) = selector_with_store().await;

        for i in 0..4 {
            store
                .insert_review(&record(&format!("p{}", i), "h1", 100 + i, 0))
                .await
                .unwrap();
        }
        for i in 0..4 {
            store
                .insert_review(&record(&format!("f{}", i), "h1", 10 + i, 1))
                .await
                .unwrap();
        }

        let reviews = selector.general_reviews("h1").await.unwrap();
        assert!(reviews.len() <= 6);
        assert_eq!(reviews.len(), 6);
    }

    #[tokio::test]
    async fn personalized_selection_ranks_and_parses() {
        let store = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        let index = Arc::new(LocalVectorIndex::new());
        let embedder = Arc::new(StubEmbedder);

        let insert = |id: &str, title: &str, body: &str, vector: Vec<f32>| {
            let index = index.clone();
            let id = id.to_string();
            let title = title.to_string();
            let body = body.to_string();
            async move {
                let metadata = ReviewMetadata {
                    hotel_id: "h1".to_string(),
                    rating: 4,
                    title: title.clone(),
                };
                index
                    .insert(
                        &id,
                        &format_review_for_embedding(&title, &body),
                        &metadata,
                        &vector,
                    )
                    .await
                    .unwrap();
            }
        };

        insert("r1", "Nice pool", "Huge heated pool.", vec![1.0, 0.0, 0.0]).await;
        insert("r2", "Quiet rooms", "Slept like a log.", vec![0.0, 1.0, 0.0]).await;
        insert("r3", "Average food", "Breakfast was fine.", vec![0.0, 0.0, 1.0]).await;

        let selector = ReviewSelector::new(store, index, embedder);
        let reviews = selector
            .reviews_for_user("h1", "I love a good pool")
            .await
            .unwrap();

        assert!(reviews.len() <= 3);
        assert_eq!(reviews[0].id, "r1");
        assert_eq!(reviews[0].title, "Nice pool");
        assert_eq!(reviews[0].body, "Huge heated pool.");
        assert_eq!(reviews[0].rating, 4);
    }

    #[tokio::test]
    async fn personalized_selection_with_default_summary() {
        let store = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        let index = Arc::new(LocalVectorIndex::new());

        let metadata = ReviewMetadata {
            hotel_id: "h1".to_string(),
            rating: 5,
            title: "Solid stay".to_string(),
        };
        index
            .insert("r1", "Solid stay: no complaints", &metadata, &[0.0, 0.0, 1.0])
            .await
            .unwrap();

        let selector = ReviewSelector::new(store, index, Arc::new(StubEmbedder));
        let reviews = selector
            .reviews_for_user("h1", DEFAULT_TRAVEL_PROFILE_SUMMARY)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].body, "no complaints");
    }
}
