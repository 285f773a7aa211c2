//! Request DTOs for the HTTP surface

use serde::{Deserialize, Serialize};

use super::profile::UserProfile;

/// Body of `POST /v1/get_user_profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub user_id: String,
}

/// Body of `POST /v1/set_user_profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileSubmitRequest {
    pub user_id: String,
    pub user_profile: UserProfile,
}

/// Body of `POST /v1/find_hotels`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchRequest {
    pub city: String,
    pub country: String,
}

/// Body of `POST /v1/base_hotel_summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDetailsRequest {
    pub request_id: String,
    pub city: String,
    pub country: String,
    pub id: String,
}
