//! SQLite-backed document store
//!
//! Holds the canonical hotel, city, review, and user-profile records. Reviews
//! are indexed on `hotel_id`, `date_added`, and `featured` so the selector
//! scans stay cheap.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::document_store::{DocumentStore, HOTEL_LOCATION_QUERY_LIMIT};
use crate::types::{CappedCounter, City, Hotel, HotelReview, ReviewRecord, UserProfile};

/// SQLite-based document store
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::Store(format!("Failed to open database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Store(format!("Failed to open in-memory database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        // WAL plus a busy timeout: the vector index opens a second
        // connection to the same file
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;
        "#,
        )
        .map_err(|e| Error::Store(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS hotels (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                country TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_hotels_location ON hotels(country, city);

            CREATE TABLE IF NOT EXISTS cities (
                key TEXT PRIMARY KEY,
                city TEXT NOT NULL,
                country TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                hotel_id TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                rating INTEGER NOT NULL,
                date_added INTEGER NOT NULL,
                featured INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_reviews_hotel_date ON reviews(hotel_id, date_added DESC);
            CREATE INDEX IF NOT EXISTS idx_reviews_hotel_featured ON reviews(hotel_id, featured, date_added DESC);

            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                base_preferences TEXT NOT NULL,
                additional_preferences TEXT NOT NULL,
                travel_profile_summary TEXT
            );
        "#,
        )
        .map_err(|e| Error::Store(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Document store migrations complete");
        Ok(())
    }
}

fn row_to_review(row: &rusqlite::Row<'_>) -> rusqlite::Result<HotelReview> {
    Ok(HotelReview {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        rating: row.get("rating")?,
    })
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>> {
        let conn = self.conn.lock();

        let mut stmt =
            conn.prepare("SELECT id, name, city, country FROM hotels WHERE id = ?1")?;

        let hotel = stmt
            .query_row(params![hotel_id], |row| {
                Ok(Hotel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    country: row.get(3)?,
                    review_count: None,
                })
            })
            .optional()?;

        Ok(hotel)
    }

    async fn find_hotels_by_location(&self, city: &str, country: &str) -> Result<Vec<Hotel>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, name, city, country FROM hotels
             WHERE city = ?1 AND country = ?2
             ORDER BY name LIMIT ?3",
        )?;

        let hotels = stmt
            .query_map(
                params![city, country, HOTEL_LOCATION_QUERY_LIMIT as i64],
                |row| {
                    Ok(Hotel {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        city: row.get(2)?,
                        country: row.get(3)?,
                        review_count: None,
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(hotels)
    }

    async fn put_hotel(&self, hotel: &Hotel) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT OR REPLACE INTO hotels (id, name, city, country) VALUES (?1, ?2, ?3, ?4)",
            params![hotel.id, hotel.name, hotel.city, hotel.country],
        )?;

        Ok(())
    }

    async fn put_city(&self, city: &City) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT OR REPLACE INTO cities (key, city, country) VALUES (?1, ?2, ?3)",
            params![city.key(), city.city, city.country],
        )?;

        Ok(())
    }

    async fn insert_review(&self, record: &ReviewRecord) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO reviews (id, hotel_id, title, body, rating, date_added, featured)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.hotel_id,
                record.title,
                record.body,
                record.rating,
                record.date_added,
                record.featured,
            ],
        )?;

        Ok(())
    }

    async fn recent_reviews(&self, hotel_id: &str, limit: usize) -> Result<Vec<HotelReview>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, title, body, rating FROM reviews
             WHERE hotel_id = ?1
             ORDER BY date_added DESC LIMIT ?2",
        )?;

        let reviews = stmt
            .query_map(params![hotel_id, limit as i64], row_to_review)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reviews)
    }

    async fn recent_featured_reviews(
        &self,
        hotel_id: &str,
        limit: usize,
    ) -> Result<Vec<HotelReview>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, title, body, rating FROM reviews
             WHERE hotel_id = ?1 AND featured = 1
             ORDER BY date_added DESC LIMIT ?2",
        )?;

        let reviews = stmt
            .query_map(params![hotel_id, limit as i64], row_to_review)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reviews)
    }

    async fn count_reviews(&self, hotel_id: &str, ceiling: i64) -> Result<CappedCounter> {
        let conn = self.conn.lock();

        // Counting over a LIMIT subquery bounds the scan at the ceiling
        let counted: i64 = conn.query_row(
            "SELECT COUNT(*) FROM (SELECT 1 FROM reviews WHERE hotel_id = ?1 LIMIT ?2)",
            params![hotel_id, ceiling],
            |row| row.get(0),
        )?;

        if counted >= ceiling {
            Ok(CappedCounter::capped(ceiling))
        } else {
            Ok(CappedCounter::exact(counted))
        }
    }

    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT base_preferences, additional_preferences, travel_profile_summary
             FROM users WHERE user_id = ?1",
        )?;

        let row = stmt
            .query_row(params![user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .optional()?;

        match row {
            Some((base_json, additional, summary)) => {
                let base_preferences = serde_json::from_str(&base_json).map_err(|e| {
                    Error::Store(format!("Corrupt stored preferences for '{}': {}", user_id, e))
                })?;
                Ok(Some(UserProfile {
                    base_preferences,
                    additional_preferences: additional,
                    travel_profile_summary: summary,
                }))
            }
            None => Ok(None),
        }
    }

    async fn put_user_profile(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        let conn = self.conn.lock();

        let base_json = serde_json::to_string(&profile.base_preferences)
            .map_err(|e| Error::Store(format!("Unserializable preferences: {}", e)))?;

        // Wholesale overwrite: a resubmitted profile drops any previously
        // derived summary until the summarizer recomputes it.
        conn.execute(
            "INSERT OR REPLACE INTO users
             (user_id, base_preferences, additional_preferences, travel_profile_summary)
             VALUES (?1, ?2, ?3, NULL)",
            params![user_id, base_json, profile.additional_preferences],
        )?;

        Ok(())
    }

    async fn set_travel_profile_summary(&self, user_id: &str, summary: &str) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "UPDATE users SET travel_profile_summary = ?2 WHERE user_id = ?1",
            params![user_id, summary],
        )?;

        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        let conn = self.conn.lock();
        let ok: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
        Ok(ok == 1)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
