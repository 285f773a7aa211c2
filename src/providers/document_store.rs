//! Document store trait: hotels, cities, reviews, and user profiles

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CappedCounter, City, Hotel, HotelReview, ReviewRecord, UserProfile};

/// Ceiling for the capped per-hotel review count
pub const MAX_NUM_REVIEWS_TO_COUNT: i64 = 1000;

/// Maximum hotels returned by a location query
pub const HOTEL_LOCATION_QUERY_LIMIT: usize = 15;

/// Trait for the key-addressed document store
///
/// Owns the canonical Hotel, City, Review, and UserProfile records. Point
/// lookups, filtered scans with sort and limit, bounded counting, upsert,
/// and a single atomic field update (the travel profile summary).
///
/// Implementations:
/// - `SqliteDocumentStore`: embedded SQLite database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point lookup of a hotel by id
    async fn get_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>>;

    /// Hotels in the given city/country, capped at [`HOTEL_LOCATION_QUERY_LIMIT`]
    async fn find_hotels_by_location(&self, city: &str, country: &str) -> Result<Vec<Hotel>>;

    /// Upsert a hotel (bulk-load surface)
    async fn put_hotel(&self, hotel: &Hotel) -> Result<()>;

    /// Upsert a city keyed `"{country}/{city}"` (bulk-load surface)
    async fn put_city(&self, city: &City) -> Result<()>;

    /// Insert the canonical record for a new review
    async fn insert_review(&self, record: &ReviewRecord) -> Result<()>;

    /// The `limit` most recent reviews for a hotel, newest first
    async fn recent_reviews(&self, hotel_id: &str, limit: usize) -> Result<Vec<HotelReview>>;

    /// The `limit` most recent featured reviews for a hotel, newest first
    async fn recent_featured_reviews(
        &self,
        hotel_id: &str,
        limit: usize,
    ) -> Result<Vec<HotelReview>>;

    /// Count reviews for a hotel, saturating at `ceiling`
    ///
    /// Never fails just because a hotel has too many reviews to count: at or
    /// above the ceiling the result is `{count: ceiling, at_ceiling: true}`.
    async fn count_reviews(&self, hotel_id: &str, ceiling: i64) -> Result<CappedCounter>;

    /// Point lookup of a user profile; `None` is the valid "no profile yet" state
    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Overwrite a user's profile wholesale from base + additional preferences
    ///
    /// Any previously derived travel profile summary is dropped until the
    /// summarizer recomputes it.
    async fn put_user_profile(&self, user_id: &str, profile: &UserProfile) -> Result<()>;

    /// In-place update of the single derived summary field (last-write-wins)
    async fn set_travel_profile_summary(&self, user_id: &str, summary: &str) -> Result<()>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
