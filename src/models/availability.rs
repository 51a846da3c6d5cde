//! Daily availability entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::rooms::RoomCounts;

/// Remaining rooms of one hotel on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAvailability {
    pub hotel_id: Uuid,
    pub date: NaiveDate,
    pub remaining: RoomCounts,
    /// Write counter; 0 means the entry has never been stored
    pub version: i64,
}

impl DailyAvailability {
    /// Fresh entry copied from the hotel baseline
    pub fn from_baseline(hotel_id: Uuid, date: NaiveDate, baseline: RoomCounts) -> Self {
        Self {
            hotel_id,
            date,
            remaining: baseline,
            version: 0,
        }
    }
}

/// Read-only availability row returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub rooms: RoomCounts,
}

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
