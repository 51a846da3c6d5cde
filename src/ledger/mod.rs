//! Room-inventory ledger core
//!
//! Pure date-range arithmetic, per-day inventory bookkeeping and pricing.
//! Nothing in here touches storage; the services load a [`HotelLedger`],
//! apply operations and persist the changed entries.

pub mod date_range;
pub mod inventory;
pub mod pricing;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::RoomType;

pub use date_range::{DateRange, Days};
pub use inventory::HotelLedger;

/// Ledger rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid date range: {end} is before {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Not enough {room_type} rooms on {date}: {available} available, {requested} requested")]
    InsufficientInventory {
        date: NaiveDate,
        room_type: RoomType,
        available: i32,
        requested: i32,
    },

    #[error("Booking would overbook {room_type} rooms on {date}")]
    Overbooking { date: NaiveDate, room_type: RoomType },
}
