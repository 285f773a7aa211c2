//! Domain types and request/response DTOs

pub mod hotel;
pub mod profile;
pub mod request;
pub mod response;
pub mod review;

pub use hotel::{CappedCounter, City, Hotel};
pub use profile::UserProfile;
pub use request::{HotelDetailsRequest, HotelSearchRequest, UserProfileSubmitRequest, UserRequest};
pub use response::{CustomizedHotelDetails, HotelSummary, WriteAck};
pub use review::{HotelReview, ReviewRecord};
