//! In-process vector index with brute-force cosine search
//!
//! Per-hotel review sets are small, so a linear scan over a concurrent map
//! is enough; no approximate index needed.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::vector_index::{ReviewMatch, ReviewMetadata, VectorIndex};

/// One embedded review record
#[derive(Debug, Clone)]
struct IndexedReview {
    text: String,
    metadata: ReviewMetadata,
    embedding: Vec<f32>,
}

/// In-process vector index keyed by review id
#[derive(Default)]
pub struct LocalVectorIndex {
    records: DashMap<String, IndexedReview>,
}

impl LocalVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched or zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[async_trait]
impl VectorIndex for LocalVectorIndex {
    async fn insert(
        &self,
        id: &str,
        text: &str,
        metadata: &ReviewMetadata,
        embedding: &[f32],
    ) -> Result<()> {
        self.records.insert(
            id.to_string(),
            IndexedReview {
                text: text.to_string(),
                metadata: metadata.clone(),
                embedding: embedding.to_vec(),
            },
        );
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        hotel_id: &str,
        k: usize,
    ) -> Result<Vec<ReviewMatch>> {
        let mut matches: Vec<ReviewMatch> = self
            .records
            .iter()
            .filter(|entry| entry.value().metadata.hotel_id == hotel_id)
            .map(|entry| ReviewMatch {
                id: entry.key().clone(),
                text: entry.value().text.clone(),
                metadata: entry.value().metadata.clone(),
                similarity: cosine_similarity(query_embedding, &entry.value().embedding),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);

        Ok(matches)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "local-cosine"
    }
}
