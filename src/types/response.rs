//! Response DTOs for the HTTP surface

use serde::{Deserialize, Serialize};

use super::review::HotelReview;

/// Response of `POST /v1/base_hotel_summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSummary {
    pub request_id: String,
    pub reviews: Vec<HotelReview>,
    pub summary: Vec<String>,
}

/// Response of `POST /v1/customized_hotel_details/:hotel_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizedHotelDetails {
    pub name: String,
    pub reviews: Vec<HotelReview>,
    pub summary: Vec<String>,
}

/// Coarse write acknowledgement for the two write endpoints
///
/// Failures are collapsed to `{success: false}` at the route boundary; the
/// underlying typed error is logged, not surfaced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteAck {
    pub success: bool,
}

impl WriteAck {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}
