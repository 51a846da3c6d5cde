//! Hotel model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{enums::StayType, rooms::RoomCounts};

/// Hotel with its baseline room capacity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub hotel_name: String,
    pub email: String,
    pub location: String,
    /// Rooms owned per type, independent of date
    pub room_details: RoomCounts,
    pub stay_types: Vec<StayType>,
    pub total_rooms: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create hotel request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotel {
    #[validate(length(min = 1, message = "Hotel name is required"))]
    pub hotel_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub room_details: RoomCounts,
    #[serde(default)]
    pub stay_types: Vec<StayType>,
}

/// Update hotel request (descriptive fields only; capacity is fixed at creation)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotel {
    #[validate(length(min = 1, message = "Hotel name cannot be empty"))]
    pub hotel_name: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    pub stay_types: Option<Vec<StayType>>,
}

/// Hotel list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HotelQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
