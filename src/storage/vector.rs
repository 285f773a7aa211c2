//! SQLite-backed vector index
//!
//! Persists review embeddings next to the canonical records so similarity
//! search survives a restart. Per-hotel candidate sets are small, so search
//! loads one hotel's rows and scores them in process.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::local::cosine_similarity;
use crate::providers::vector_index::{ReviewMatch, ReviewMetadata, VectorIndex};

/// SQLite-based vector index, usually sharing the document store's database file
pub struct SqliteVectorIndex {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteVectorIndex {
    /// Create or open the index at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::Index(format!("Failed to open database: {}", e)))?;

        let index = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        index.migrate()?;
        Ok(index)
    }

    /// Create an in-memory index (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Index(format!("Failed to open in-memory database: {}", e)))?;

        let index = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        index.migrate()?;
        Ok(index)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;

            CREATE TABLE IF NOT EXISTS review_embeddings (
                id TEXT PRIMARY KEY,
                hotel_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_embeddings_hotel ON review_embeddings(hotel_id);
        "#,
        )
        .map_err(|e| Error::Index(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }
}

fn embedding_to_blob(embedding: &[f32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(embedding.len() * 4);
    for value in embedding {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

fn blob_to_embedding(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[async_trait]
impl VectorIndex for SqliteVectorIndex {
    async fn insert(
        &self,
        id: &str,
        text: &str,
        metadata: &ReviewMetadata,
        embedding: &[f32],
    ) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT OR REPLACE INTO review_embeddings
             (id, hotel_id, rating, title, text, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                metadata.hotel_id,
                metadata.rating,
                metadata.title,
                text,
                embedding_to_blob(embedding),
            ],
        )?;

        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        hotel_id: &str,
        k: usize,
    ) -> Result<Vec<ReviewMatch>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, rating, title, text, embedding
             FROM review_embeddings WHERE hotel_id = ?1",
        )?;

        let mut matches = stmt
            .query_map(params![hotel_id], |row| {
                let blob: Vec<u8> = row.get("embedding")?;
                Ok(ReviewMatch {
                    id: row.get("id")?,
                    text: row.get("text")?,
                    metadata: ReviewMetadata {
                        hotel_id: hotel_id.to_string(),
                        rating: row.get("rating")?,
                        title: row.get("title")?,
                    },
                    similarity: cosine_similarity(query_embedding, &blob_to_embedding(&blob)),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);

        Ok(matches)
    }

    async fn len(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM review_embeddings", [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    async fn health_check(&self) -> Result<bool> {
        let conn = self.conn.lock();
        let ok: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
        Ok(ok == 1)
    }

    fn name(&self) -> &str {
        "sqlite-cosine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::DocumentStore;
    use crate::storage::SqliteDocumentStore;
    use crate::types::ReviewRecord;

    fn meta(hotel_id: &str, title: &str) -> ReviewMetadata {
        ReviewMetadata {
            hotel_id: hotel_id.to_string(),
            rating: 4,
            title: title.to_string(),
        }
    }

    #[test]
    fn embedding_blob_round_trip() {
        let embedding = vec![1.0f32, -0.5, 0.25];
        assert_eq!(blob_to_embedding(&embedding_to_blob(&embedding)), embedding);
        assert!(blob_to_embedding(&[]).is_empty());
    }

    #[tokio::test]
    async fn search_filters_by_hotel_and_ranks_by_similarity() {
        let index = SqliteVectorIndex::in_memory().unwrap();
        index
            .insert("r1", "Pool: great pool", &meta("h1", "Pool"), &[1.0, 0.0])
            .await
            .unwrap();
        index
            .insert("r2", "Gym: decent gym", &meta("h1", "Gym"), &[0.6, 0.8])
            .await
            .unwrap();
        index
            .insert("r3", "Spa: lovely spa", &meta("h2", "Spa"), &[1.0, 0.0])
            .await
            .unwrap();

        let results = index.search(&[1.0, 0.0], "h1", 3).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "r1");
        assert_eq!(results[1].id, "r2");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[tokio::test]
    async fn insert_replaces_by_id() {
        let index = SqliteVectorIndex::in_memory().unwrap();
        index
            .insert("r1", "Old: text", &meta("h1", "Old"), &[1.0])
            .await
            .unwrap();
        index
            .insert("r1", "New: text", &meta("h1", "New"), &[1.0])
            .await
            .unwrap();

        assert_eq!(index.len().await.unwrap(), 1);
        let results = index.search(&[1.0], "h1", 1).await.unwrap();
        assert_eq!(results[0].metadata.title, "New");
    }

    #[tokio::test]
    async fn embedded_reviews_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staysense.db");

        {
            let index = SqliteVectorIndex::new(&path).unwrap();
            index
                .insert("r1", "Pool: huge pool", &meta("h1", "Pool"), &[1.0, 0.0])
                .await
                .unwrap();
        }

        let index = SqliteVectorIndex::new(&path).unwrap();
        let results = index.search(&[1.0, 0.0], "h1", 3).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "r1");
        assert_eq!(results[0].text, "Pool: huge pool");
        assert_eq!(results[0].metadata.title, "Pool");
    }

    #[tokio::test]
    async fn both_review_sides_survive_reopen_of_a_shared_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staysense.db");

        {
            let store = SqliteDocumentStore::new(&path).unwrap();
            let index = SqliteVectorIndex::new(&path).unwrap();
            let record = ReviewRecord {
                id: "r1".to_string(),
                hotel_id: "h1".to_string(),
                title: "Pool".to_string(),
                body: "Huge pool.".to_string(),
                rating: 5,
                date_added: 100,
                featured: 0,
            };
            store.insert_review(&record).await.unwrap();
            index
                .insert("r1", "Pool: Huge pool.", &meta("h1", "Pool"), &[1.0, 0.0])
                .await
                .unwrap();
        }

        let store = SqliteDocumentStore::new(&path).unwrap();
        let index = SqliteVectorIndex::new(&path).unwrap();

        let canonical = store.recent_reviews("h1", 3).await.unwrap();
        assert_eq!(canonical.len(), 1);

        let matches = index.search(&[1.0, 0.0], "h1", 3).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, canonical[0].id);
    }
}
