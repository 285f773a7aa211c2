//! staysense: hotel-review recommendation backend
//!
//! Stores hotels, cities, user travel-preference profiles, and textual
//! reviews, and serves endpoints that list hotels by location, summarize a
//! hotel's reviews (generally or personalized to a user's stated
//! preferences), and accept new reviews. Reviews live in two places at once:
//! a canonical document-store record and an embedded projection in a vector
//! index used for personalization.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod profiles;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    CappedCounter, City, CustomizedHotelDetails, Hotel, HotelReview, HotelSummary, ReviewRecord,
    UserProfile,
};
