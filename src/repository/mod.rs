//! Repository layer for persistent state
//!
//! Hotels, daily availability rows and bookings live behind the
//! [`Repository`] trait. [`PgRepository`] stores them in PostgreSQL,
//! [`MemoryRepository`] keeps them in process.
//!
//! Availability rows are written with compare-and-swap on their `version`:
//! a row read at version `n` is only overwritten while it is still at `n`,
//! and a row that was never stored (version 0) is only inserted if absent.
//! Any mismatch fails the whole write with [`AppError::Conflict`].

pub mod availability;
pub mod bookings;
pub mod hotels;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{booking::BookingQuery, Booking, BookingStatus, DailyAvailability, Hotel},
};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Booking record change committed together with inventory rows
#[derive(Debug, Clone, Copy)]
pub enum BookingChange<'a> {
    Insert(&'a Booking),
    Update(&'a Booking),
    Delete(Uuid),
}

/// Storage operations used by the services
#[async_trait]
pub trait Repository: Send + Sync {
    async fn hotels_create(&self, hotel: &Hotel) -> AppResult<()>;

    async fn hotels_get_by_id(&self, id: Uuid) -> AppResult<Hotel>;

    async fn hotels_list(&self, limit: i64, offset: i64) -> AppResult<Vec<Hotel>>;

    async fn hotels_update(&self, hotel: &Hotel) -> AppResult<()>;

    /// Delete a hotel together with its availability rows
    async fn hotels_delete(&self, id: Uuid) -> AppResult<()>;

    /// Stored availability rows of a hotel between two days, inclusive, by date
    async fn availability_get(
        &self,
        hotel_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyAvailability>>;

    /// Write availability rows atomically (see module docs for versioning)
    async fn availability_save(&self, entries: &[DailyAvailability]) -> AppResult<()>;

    async fn bookings_get_by_id(&self, id: Uuid) -> AppResult<Booking>;

    async fn bookings_get_by_confirmation(&self, confirmation_number: &str) -> AppResult<Booking>;

    async fn bookings_confirmation_exists(&self, confirmation_number: &str) -> AppResult<bool>;

    /// Bookings matching the query, ordered by start date
    async fn bookings_list(&self, query: &BookingQuery, limit: i64, offset: i64) -> AppResult<Vec<Booking>>;

    async fn bookings_count_for_hotel(&self, hotel_id: Uuid) -> AppResult<i64>;

    async fn bookings_set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Booking>;

    /// Apply a booking change and availability rows in one atomic step
    async fn bookings_commit(
        &self,
        inventory: &[DailyAvailability],
        change: BookingChange<'_>,
    ) -> AppResult<()>;
}

/// Shared repository handle
pub type DynRepository = Arc<dyn Repository>;

pub(crate) fn stale_inventory(entry: &DailyAvailability) -> AppError {
    AppError::Conflict(format!(
        "Availability of hotel {} on {} was modified concurrently",
        entry.hotel_id, entry.date
    ))
}

/// Turn unique-constraint violations into conflicts
pub(crate) fn unique_violation(e: sqlx::Error, message: &str) -> AppError {
    let is_unique = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false);

    if is_unique {
        AppError::Conflict(message.to_string())
    } else {
        AppError::Database(e)
    }
}
