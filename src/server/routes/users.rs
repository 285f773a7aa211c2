//! User profile endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{UserProfile, UserProfileSubmitRequest, UserRequest, WriteAck};

/// POST /v1/get_user_profile - travel preferences of the specified user
///
/// An absent profile is a valid state, returned as null.
pub async fn get_user_profile(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<Json<Option<UserProfile>>> {
    let profile = state.store().get_user_profile(&request.user_id).await?;
    Ok(Json(profile))
}

/// POST /v1/set_user_profile - store the travel preferences of the user
///
/// On a successful write, a deferred Profile Summarizer run is spawned to
/// derive the travel profile summary outside the response path. Write
/// failures collapse to `{success: false}`.
pub async fn set_user_profile(
    State(state): State<AppState>,
    Json(request): Json<UserProfileSubmitRequest>,
) -> Json<WriteAck> {
    match state
        .store()
        .put_user_profile(&request.user_id, &request.user_profile)
        .await
    {
        Ok(()) => {
            state
                .profile_summarizer()
                .spawn(request.user_id, request.user_profile);
            Json(WriteAck::ok())
        }
        Err(e) => {
            tracing::warn!(user_id = %request.user_id, "Profile write failed: {}", e);
            Json(WriteAck::failed())
        }
    }
}
