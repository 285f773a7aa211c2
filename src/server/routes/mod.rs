//! API routes for the recommendation server

pub mod hotels;
pub mod reviews;
pub mod users;

use axum::{routing::post, Router};

use crate::server::state::AppState;

/// Build the `/v1` API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/get_user_profile", post(users::get_user_profile))
        .route("/set_user_profile", post(users::set_user_profile))
        .route("/find_hotels", post(hotels::find_hotels))
        .route("/base_hotel_summary", post(hotels::base_hotel_summary))
        .route("/:hotel_id/add_review", post(reviews::add_review))
        .route(
            "/customized_hotel_details/:hotel_id",
            post(hotels::customized_hotel_details),
        )
}
