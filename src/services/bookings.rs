//! Booking transaction manager
//!
//! Each mutating operation runs under its hotel's lock: it loads the
//! ledger for the affected days, applies restore/check/deduct in memory and
//! commits the changed inventory rows together with the booking record in
//! one repository call. If any step fails the in-memory ledger is dropped
//! and nothing is written, so a failed update leaves the original
//! reservation exactly as it was.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use super::{
    hotels::page_bounds,
    inventory::InventoryService,
    locks::HotelLocks,
    notifications::{NoticeKind, NotificationService},
};
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    ledger::{pricing, DateRange},
    models::{
        booking::{BookingQuery, RoomLineRequest},
        rooms::MAX_ROOMS_PER_TYPE,
        Booking, BookingDetails, BookingStatus, CreateBooking, RoomSelection, RoomType,
    },
    repository::{BookingChange, DynRepository},
};

/// Booking after a change, plus the notification warning if delivery failed
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub warning: Option<String>,
}

#[derive(Clone)]
pub struct BookingsService {
    repository: DynRepository,
    inventory: InventoryService,
    locks: HotelLocks,
    notifications: NotificationService,
    config: BookingConfig,
}

impl BookingsService {
    pub fn new(
        repository: DynRepository,
        inventory: InventoryService,
        locks: HotelLocks,
        notifications: NotificationService,
        config: BookingConfig,
    ) -> Self {
        Self {
            repository,
            inventory,
            locks,
            notifications,
            config,
        }
    }

    /// Reserve rooms and record a pending booking
    pub async fn create(&self, request: CreateBooking) -> AppResult<BookingOutcome> {
        let (rooms, range) = self.validate_details(&request.details)?;
        let total_price = priced(&rooms, range.nights())?;
        self.repository.hotels_get_by_id(request.hotel_id).await?;

        let guard = self.locks.acquire(request.hotel_id).await;

        // the hotel may have been deleted while we waited
        let hotel = self.repository.hotels_get_by_id(request.hotel_id).await?;

        let days: Vec<NaiveDate> = range.days().collect();
        let counts = rooms.counts();
        let mut ledger = self.inventory.load_ledger(&hotel, &range).await?;
        ledger.ensure_initialized(&days);
        ledger.check_availability(&days, &counts)?;
        ledger.deduct(&days, &counts)?;

        let confirmation_number = self.confirmation_number().await?;
        let details = request.details;
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            hotel_id: hotel.id,
            hotel_name: hotel.hotel_name.clone(),
            customer: details.customer,
            guests: details.guests,
            rooms,
            date_range: details.date_range,
            stay_type: details.stay_type,
            special_requests: details.special_requests,
            total_price,
            confirmation_number,
            status: BookingStatus::Pending,
            low_availability: ledger.is_low(&days, &counts, self.config.low_availability_threshold),
            created_at: now,
            updated_at: now,
        };

        self.repository
            .bookings_commit(&ledger.changed_entries(), BookingChange::Insert(&booking))
            .await?;
        drop(guard);

        tracing::info!(
            "Created booking {} for hotel {} ({} to {})",
            booking.confirmation_number,
            hotel.id,
            range.start(),
            range.end()
        );
        if booking.low_availability {
            tracing::warn!("Low availability at hotel {} after booking {}", hotel.id, booking.confirmation_number);
        }

        let warning = self.notifications.notify(NoticeKind::Confirmation, &booking).await;
        Ok(BookingOutcome { booking, warning })
    }

    /// Move a booking to new rooms and/or dates.
    ///
    /// The old reservation is released and the new one taken in a single
    /// commit; when the new one cannot be served nothing changes.
    pub async fn update(&self, id: Uuid, details: BookingDetails) -> AppResult<BookingOutcome> {
        let (rooms, range) = self.validate_details(&details)?;
        let total_price = priced(&rooms, range.nights())?;
        let hotel_id = self.repository.bookings_get_by_id(id).await?.hotel_id;

        let guard = self.locks.acquire(hotel_id).await;

        let existing = self.repository.bookings_get_by_id(id).await?;
        let hotel = self.repository.hotels_get_by_id(existing.hotel_id).await?;
        let old_range = DateRange::new(existing.date_range.start_date, existing.date_range.end_date)?;

        let mut ledger = self.inventory.load_ledger(&hotel, &old_range.union(&range)).await?;

        let old_days: Vec<NaiveDate> = old_range.days().collect();
        ledger.restore(&old_days, &existing.rooms.counts());

        let days: Vec<NaiveDate> = range.days().collect();
        let counts = rooms.counts();
        ledger.ensure_initialized(&days);
        ledger.check_availability(&days, &counts)?;
        ledger.deduct(&days, &counts)?;

        let booking = Booking {
            customer: details.customer,
            guests: details.guests,
            rooms,
            date_range: details.date_range,
            stay_type: details.stay_type,
            special_requests: details.special_requests,
            total_price,
            low_availability: ledger.is_low(&days, &counts, self.config.low_availability_threshold),
            updated_at: Utc::now(),
            ..existing
        };

        self.repository
            .bookings_commit(&ledger.changed_entries(), BookingChange::Update(&booking))
            .await?;
        drop(guard);

        tracing::info!("Updated booking {}", booking.confirmation_number);

        let warning = self.notifications.notify(NoticeKind::Updated, &booking).await;
        Ok(BookingOutcome { booking, warning })
    }

    /// Release a booking's rooms and delete it.
    ///
    /// The returned snapshot carries status `cancelled`.
    pub async fn cancel(&self, id: Uuid) -> AppResult<BookingOutcome> {
        let hotel_id = self.repository.bookings_get_by_id(id).await?.hotel_id;

        let guard = self.locks.acquire(hotel_id).await;

        let existing = self.repository.bookings_get_by_id(id).await?;
        let hotel = self.repository.hotels_get_by_id(existing.hotel_id).await?;
        let range = DateRange::new(existing.date_range.start_date, existing.date_range.end_date)?;

        let mut ledger = self.inventory.load_ledger(&hotel, &range).await?;
        let days: Vec<NaiveDate> = range.days().collect();
        ledger.restore(&days, &existing.rooms.counts());

        self.repository
            .bookings_commit(&ledger.changed_entries(), BookingChange::Delete(id))
            .await?;
        drop(guard);

        let booking = Booking {
            status: BookingStatus::Cancelled,
            updated_at: Utc::now(),
            ..existing
        };
        tracing::info!("Cancelled booking {}", booking.confirmation_number);

        let warning = self.notifications.notify(NoticeKind::Cancelled, &booking).await;
        Ok(BookingOutcome { booking, warning })
    }

    /// Flip pending and confirmed; inventory is untouched
    pub async fn toggle_status(&self, id: Uuid) -> AppResult<Booking> {
        let hotel_id = self.repository.bookings_get_by_id(id).await?.hotel_id;
        let _guard = self.locks.acquire(hotel_id).await;

        let current = self.repository.bookings_get_by_id(id).await?;
        self.repository
            .bookings_set_status(id, current.status.toggled(), Utc::now())
            .await
    }

    /// Set the status explicitly; cancelling goes through [`Self::cancel`]
    pub async fn set_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        if status == BookingStatus::Cancelled {
            return Err(AppError::Validation(
                "Bookings are cancelled by deleting them".to_string(),
            ));
        }

        let hotel_id = self.repository.bookings_get_by_id(id).await?.hotel_id;
        let _guard = self.locks.acquire(hotel_id).await;
        self.repository.bookings_set_status(id, status, Utc::now()).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Booking> {
        self.repository.bookings_get_by_id(id).await
    }

    pub async fn get_by_confirmation(&self, confirmation_number: &str) -> AppResult<Booking> {
        self.repository.bookings_get_by_confirmation(confirmation_number).await
    }

    /// Bookings ordered by start date, optionally filtered by hotel and status
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let (limit, offset) = page_bounds(query.page, query.per_page)?;
        self.repository.bookings_list(query, limit, offset).await
    }

    /// Check a booking request and resolve its rooms and stay
    fn validate_details(&self, details: &BookingDetails) -> AppResult<(RoomSelection, DateRange)> {
        details.validate()?;
        let rooms = room_selection(&details.rooms)?;

        let start = details.date_range.start_date;
        let end = details.date_range.end_date;
        let range = DateRange::new(start, end)?;
        if range.nights() < 1 {
            return Err(AppError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        if range.nights() > self.config.max_stay_nights {
            return Err(AppError::Validation(format!(
                "Stays are limited to {} nights",
                self.config.max_stay_nights
            )));
        }
        Ok((rooms, range))
    }

    async fn confirmation_number(&self) -> AppResult<String> {
        for _ in 0..self.config.confirmation_attempts.max(1) {
            let candidate = format!(
                "{}-{}",
                self.config.confirmation_prefix,
                Uuid::new_v4().simple().to_string().to_uppercase()
            );
            if !self.repository.bookings_confirmation_exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::warn!("Confirmation number {} already taken, drawing another", candidate);
        }
        Err(AppError::Internal(
            "Could not generate a unique confirmation number".to_string(),
        ))
    }
}

/// Booking total, refused when it cannot be computed or stored
fn priced(rooms: &RoomSelection, nights: i64) -> AppResult<Decimal> {
    pricing::total_price(rooms, nights)
        .filter(|total| *total <= pricing::MAX_TOTAL_PRICE)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Total price cannot exceed {}",
                pricing::MAX_TOTAL_PRICE
            ))
        })
}

/// Turn submitted room lines into a selection keyed by room type
fn room_selection(lines: &[RoomLineRequest]) -> AppResult<RoomSelection> {
    let invalid: Vec<&str> = lines
        .iter()
        .filter(|line| line.room_type.parse::<RoomType>().is_err())
        .map(|line| line.room_type.as_str())
        .collect();
    if !invalid.is_empty() {
        return Err(AppError::Validation(format!(
            "Invalid room types: {}",
            invalid.join(", ")
        )));
    }

    let mut seen = HashSet::new();
    let mut selection = RoomSelection::default();
    for line in lines {
        let room_type: RoomType = line.room_type.parse().map_err(AppError::Validation)?;
        if !seen.insert(room_type) {
            return Err(AppError::Validation(format!("Duplicate room type: {}", room_type)));
        }
        if line.room_count < 0 {
            return Err(AppError::Validation(format!(
                "Room count for {} cannot be negative",
                room_type
            )));
        }
        if line.room_count > MAX_ROOMS_PER_TYPE {
            return Err(AppError::Validation(format!(
                "Room count for {} cannot exceed {}",
                room_type, MAX_ROOMS_PER_TYPE
            )));
        }
        if line.price_per_room < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Price per room for {} cannot be negative",
                room_type
            )));
        }
        if line.price_per_room > pricing::MAX_PRICE_PER_ROOM {
            return Err(AppError::Validation(format!(
                "Price per room for {} cannot exceed {}",
                room_type,
                pricing::MAX_PRICE_PER_ROOM
            )));
        }
        if line.price_per_room.normalize().scale() > pricing::PRICE_SCALE {
            return Err(AppError::Validation(format!(
                "Price per room for {} has more than {} decimal places",
                room_type,
                pricing::PRICE_SCALE
            )));
        }

        let entry = selection.line_mut(room_type);
        entry.count = line.room_count;
        entry.price_per_room = line.price_per_room;
    }

    if !selection.counts().any() {
        return Err(AppError::Validation(
            "At least one room must be booked".to_string(),
        ));
    }
    Ok(selection)
}
