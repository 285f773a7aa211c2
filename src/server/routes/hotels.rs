//! Hotel listing and summary endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Error, Result};
use crate::retrieval::DEFAULT_TRAVEL_PROFILE_SUMMARY;
use crate::server::state::AppState;
use crate::types::{
    CustomizedHotelDetails, Hotel, HotelDetailsRequest, HotelSearchRequest, HotelSummary,
    UserProfile, UserRequest,
};

/// POST /v1/find_hotels - hotels in the given city, each annotated with a
/// capped review count
pub async fn find_hotels(
    State(state): State<AppState>,
    Json(request): Json<HotelSearchRequest>,
) -> Result<Json<Vec<Hotel>>> {
    let ceiling = state.config().store.count_ceiling;

    let mut hotels = state
        .store()
        .find_hotels_by_location(&request.city, &request.country)
        .await?;

    for hotel in &mut hotels {
        let count = state.store().count_reviews(&hotel.id, ceiling).await?;
        hotel.review_count = Some(count);
    }

    Ok(Json(hotels))
}

/// POST /v1/base_hotel_summary - recent + featured reviews with a general
/// concise summary
pub async fn base_hotel_summary(
    State(state): State<AppState>,
    Json(request): Json<HotelDetailsRequest>,
) -> Result<Json<HotelSummary>> {
    let reviews = state.selector().general_reviews(&request.id).await?;
    let summary = state.summarizer().summarize_for_hotel(&reviews).await?;

    Ok(Json(HotelSummary {
        request_id: request.request_id,
        reviews,
        summary,
    }))
}

/// POST /v1/customized_hotel_details/:hotel_id - the three reviews most
/// relevant to this user, with a user-tailored summary
///
/// 404 when the hotel is unknown. A missing profile or a not-yet-derived
/// summary falls back to the default personalization text.
pub async fn customized_hotel_details(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Json(request): Json<UserRequest>,
) -> Result<Json<CustomizedHotelDetails>> {
    let hotel = state
        .store()
        .get_hotel(&hotel_id)
        .await?
        .ok_or_else(|| Error::HotelNotFound(hotel_id.clone()))?;

    let user_profile = state.store().get_user_profile(&request.user_id).await?;
    let travel_profile_summary = personalization_query(user_profile);

    let reviews = state
        .selector()
        .reviews_for_user(&hotel_id, &travel_profile_summary)
        .await?;

    let summary = state
        .summarizer()
        .summarize_for_user(&reviews, &travel_profile_summary)
        .await?;

    Ok(Json(CustomizedHotelDetails {
        name: hotel.name,
        reviews,
        summary,
    }))
}

/// Personalization query for a user: their derived summary, or the default
/// when the profile is missing or the summary is absent or blank
///
/// Similarity search needs a non-empty query, so a blank stored summary is
/// treated the same as no summary at all.
fn personalization_query(profile: Option<UserProfile>) -> String {
    profile
        .and_then(|profile| profile.travel_profile_summary)
        .filter(|summary| !summary.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TRAVEL_PROFILE_SUMMARY.to_string())
}
