//! Persistent room-inventory ledger
//!
//! Every call loads the hotel's entries for the affected days, applies the
//! pure [`HotelLedger`] operation and stores the changed entries in one
//! repository write. Mutations hold the hotel lock for their duration.

use chrono::NaiveDate;
use uuid::Uuid;

use super::locks::HotelLocks;
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    ledger::{DateRange, HotelLedger},
    models::{DaySnapshot, Hotel, RoomCounts},
    repository::DynRepository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: DynRepository,
    locks: HotelLocks,
    config: BookingConfig,
}

impl InventoryService {
    pub fn new(repository: DynRepository, locks: HotelLocks, config: BookingConfig) -> Self {
        Self { repository, locks, config }
    }

    /// Load a hotel's ledger covering `range`
    pub(crate) async fn load_ledger(&self, hotel: &Hotel, range: &DateRange) -> AppResult<HotelLedger> {
        let entries = self
            .repository
            .availability_get(hotel.id, range.start(), range.end())
            .await?;
        Ok(HotelLedger::new(hotel.id, hotel.room_details, entries))
    }

    /// Persist what an operation changed, if anything
    pub(crate) async fn save_ledger(&self, ledger: &HotelLedger) -> AppResult<()> {
        if ledger.has_changes() {
            self.repository.availability_save(&ledger.changed_entries()).await?;
        }
        Ok(())
    }

    /// Remaining rooms per day between two dates, inclusive.
    ///
    /// Days never booked report the hotel baseline; nothing is written.
    pub async fn snapshot(
        &self,
        hotel_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DaySnapshot>> {
        let range = DateRange::new(start, end)?;
        if range.day_count() > self.config.max_availability_days {
            return Err(AppError::Validation(format!(
                "Availability range cannot exceed {} days",
                self.config.max_availability_days
            )));
        }

        let hotel = self.repository.hotels_get_by_id(hotel_id).await?;
        let ledger = self.load_ledger(&hotel, &range).await?;
        Ok(ledger.snapshot(range.days()))
    }

    /// Create baseline entries for the given days; returns how many were new
    pub async fn ensure_initialized(&self, hotel_id: Uuid, days: &[NaiveDate]) -> AppResult<usize> {
        let Some(range) = span(days) else {
            return Ok(0);
        };
        let _guard = self.locks.acquire(hotel_id).await;
        let hotel = self.repository.hotels_get_by_id(hotel_id).await?;

        let mut ledger = self.load_ledger(&hotel, &range).await?;
        let created = ledger.ensure_initialized(days);
        self.save_ledger(&ledger).await?;

        if created > 0 {
            tracing::debug!("Initialized {} availability days for hotel {}", created, hotel_id);
        }
        Ok(created)
    }

    /// Fail with the first day and room type that cannot serve `requested`
    pub async fn check_availability(
        &self,
        hotel_id: Uuid,
        days: &[NaiveDate],
        requested: &RoomCounts,
    ) -> AppResult<()> {
        let Some(range) = span(days) else {
            return Ok(());
        };
        let hotel = self.repository.hotels_get_by_id(hotel_id).await?;
        let ledger = self.load_ledger(&hotel, &range).await?;
        ledger.check_availability(days, requested)?;
        Ok(())
    }

    /// Subtract `counts` on every day, or on none of them
    pub async fn deduct(&self, hotel_id: Uuid, days: &[NaiveDate], counts: &RoomCounts) -> AppResult<()> {
        let Some(range) = span(days) else {
            return Ok(());
        };
        let _guard = self.locks.acquire(hotel_id).await;
        let hotel = self.repository.hotels_get_by_id(hotel_id).await?;

        let mut ledger = self.load_ledger(&hotel, &range).await?;
        ledger.deduct(days, counts)?;
        self.save_ledger(&ledger).await
    }

    /// Give `counts` back on every day, never above the hotel baseline
    pub async fn restore(&self, hotel_id: Uuid, days: &[NaiveDate], counts: &RoomCounts) -> AppResult<()> {
        let Some(range) = span(days) else {
            return Ok(());
        };
        let _guard = self.locks.acquire(hotel_id).await;
        let hotel = self.repository.hotels_get_by_id(hotel_id).await?;

        let mut ledger = self.load_ledger(&hotel, &range).await?;
        ledger.restore(days, counts);
        self.save_ledger(&ledger).await
    }
}

/// Smallest range covering all the given days
fn span(days: &[NaiveDate]) -> Option<DateRange> {
    let first = days.iter().min()?;
    let last = days.iter().max()?;
    DateRange::new(*first, *last).ok()
}
