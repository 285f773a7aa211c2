//! Review submission endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::server::state::AppState;
use crate::types::{HotelReview, WriteAck};

/// POST /v1/:hotel_id/add_review - insert a review for a hotel
///
/// A fresh id is generated server-side; any id in the payload is ignored.
/// Failures (validation included) collapse to `{success: false}`.
pub async fn add_review(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Json(payload): Json<HotelReview>,
) -> Json<WriteAck> {
    match state
        .ingest()
        .insert_review(&hotel_id, &payload.title, &payload.body, payload.rating)
        .await
    {
        Ok(review_id) => {
            tracing::debug!(hotel_id, review_id, "Review accepted");
            Json(WriteAck::ok())
        }
        Err(e) => {
            tracing::warn!(hotel_id, "Review insert failed: {}", e);
            Json(WriteAck::failed())
        }
    }
}
