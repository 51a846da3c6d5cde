//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{
    enums::{BookingStatus, StayType},
    rooms::RoomSelection,
};

/// Guest contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Customer {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Customer phone is required"))]
    pub phone: String,
}

/// Guest head count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Guests {
    #[serde(default)]
    #[validate(range(min = 0, message = "Adults cannot be negative"))]
    pub adults: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Children cannot be negative"))]
    pub children: i32,
}

/// Requested stay dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StayDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub hotel_id: Uuid,
    /// Hotel name at booking time
    pub hotel_name: String,
    pub customer: Customer,
    pub guests: Guests,
    pub rooms: RoomSelection,
    pub date_range: StayDates,
    pub stay_type: StayType,
    pub special_requests: Option<String>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub confirmation_number: String,
    pub status: BookingStatus,
    /// Set when the booking left a booked room type at or below the alert threshold
    pub low_availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested room line, as submitted by clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomLineRequest {
    /// single, double, triple, family or suite
    pub room_type: String,
    pub room_count: i32,
    #[schema(value_type = String)]
    pub price_per_room: Decimal,
}

/// Fields shared by booking creation and update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[validate(nested)]
    pub customer: Customer,
    #[serde(default)]
    #[validate(nested)]
    pub guests: Guests,
    #[validate(length(min = 1, message = "At least one room is required"))]
    pub rooms: Vec<RoomLineRequest>,
    pub date_range: StayDates,
    pub stay_type: StayType,
    pub special_requests: Option<String>,
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub hotel_id: Uuid,
    #[serde(flatten)]
    pub details: BookingDetails,
}

/// Explicit status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: BookingStatus,
}

/// Booking list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    pub hotel_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
