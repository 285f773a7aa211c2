//! Review selection for hotel summaries

pub mod selector;

pub use selector::{
    extract_review_body, format_review_for_embedding, ReviewSelector,
    DEFAULT_TRAVEL_PROFILE_SUMMARY,
};
