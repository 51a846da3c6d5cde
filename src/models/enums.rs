//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RoomType
// ---------------------------------------------------------------------------

/// Room categories a hotel can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[serde(alias = "singleRoom")]
    Single,
    #[serde(alias = "doubleRoom")]
    Double,
    #[serde(alias = "tripleRoom")]
    Triple,
    #[serde(alias = "familyRoom")]
    Family,
    #[serde(alias = "suiteRoom")]
    Suite,
}

impl RoomType {
    /// Stable iteration order used by every ledger check
    pub const ALL: [RoomType; 5] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Triple,
        RoomType::Family,
        RoomType::Suite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Triple => "triple",
            RoomType::Family => "family",
            RoomType::Suite => "suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" | "singleRoom" => Ok(RoomType::Single),
            "double" | "doubleRoom" => Ok(RoomType::Double),
            "triple" | "tripleRoom" => Ok(RoomType::Triple),
            "family" | "familyRoom" => Ok(RoomType::Family),
            "suite" | "suiteRoom" => Ok(RoomType::Suite),
            other => Err(format!("Invalid room type: {}", other)),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StayType
// ---------------------------------------------------------------------------

/// Board arrangement for a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StayType {
    #[serde(rename = "Room Only")]
    RoomOnly,
    #[serde(rename = "Bed & Breakfast")]
    BedAndBreakfast,
    #[serde(rename = "Full Board")]
    FullBoard,
    #[serde(rename = "Half Board")]
    HalfBoard,
}

impl StayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayType::RoomOnly => "Room Only",
            StayType::BedAndBreakfast => "Bed & Breakfast",
            StayType::FullBoard => "Full Board",
            StayType::HalfBoard => "Half Board",
        }
    }
}

impl FromStr for StayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Room Only" => Ok(StayType::RoomOnly),
            "Bed & Breakfast" => Ok(StayType::BedAndBreakfast),
            "Full Board" => Ok(StayType::FullBoard),
            "Half Board" => Ok(StayType::HalfBoard),
            other => Err(format!("Invalid stay type: {}", other)),
        }
    }
}

impl std::fmt::Display for StayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status.
///
/// `Cancelled` is never persisted: cancelling deletes the booking and the
/// status only appears on the snapshot handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Flip between pending and confirmed
    pub fn toggled(self) -> Self {
        match self {
            BookingStatus::Pending => BookingStatus::Confirmed,
            BookingStatus::Confirmed => BookingStatus::Pending,
            BookingStatus::Cancelled => BookingStatus::Cancelled,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("Invalid booking status: {}", other)),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
