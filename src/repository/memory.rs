//! In-process repository
//!
//! Keeps every table in maps behind one async lock. Each trait call takes
//! the lock once, validates, then writes, so a failed call leaves nothing
//! behind. Used by the `memory` storage backend and by tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{stale_inventory, BookingChange, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{booking::BookingQuery, Booking, BookingStatus, DailyAvailability, Hotel},
};

#[derive(Default)]
struct MemoryState {
    hotels: HashMap<Uuid, Hotel>,
    availability: BTreeMap<(Uuid, NaiveDate), DailyAvailability>,
    bookings: HashMap<Uuid, Booking>,
}

impl MemoryState {
    fn check_inventory(&self, entries: &[DailyAvailability]) -> AppResult<()> {
        for entry in entries {
            if let Some(room_type) = entry.remaining.first_negative() {
                return Err(AppError::Internal(format!(
                    "Refusing negative {} count for hotel {} on {}",
                    room_type, entry.hotel_id, entry.date
                )));
            }
            let stored = self.availability.get(&(entry.hotel_id, entry.date));
            let current = match stored {
                Some(row) => row.version,
                None => 0,
            };
            if current != entry.version {
                return Err(stale_inventory(entry));
            }
        }
        Ok(())
    }

    fn write_inventory(&mut self, entries: &[DailyAvailability]) {
        for entry in entries {
            let mut row = entry.clone();
            row.version += 1;
            self.availability.insert((entry.hotel_id, entry.date), row);
        }
    }
}

/// Repository keeping all state in memory
#[derive(Clone, Default)]
pub struct MemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn hotels_create(&self, hotel: &Hotel) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.hotels.values().any(|h| h.email == hotel.email) {
            return Err(AppError::Conflict("A hotel with this email already exists".to_string()));
        }
        state.hotels.insert(hotel.id, hotel.clone());
        Ok(())
    }

    async fn hotels_get_by_id(&self, id: Uuid) -> AppResult<Hotel> {
        self.state
            .read()
            .await
            .hotels
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::hotel_not_found(id))
    }

    async fn hotels_list(&self, limit: i64, offset: i64) -> AppResult<Vec<Hotel>> {
        let state = self.state.read().await;
        let mut hotels: Vec<Hotel> = state.hotels.values().cloned().collect();
        hotels.sort_by(|a, b| a.hotel_name.cmp(&b.hotel_name).then(a.id.cmp(&b.id)));
        Ok(hotels
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn hotels_update(&self, hotel: &Hotel) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state
            .hotels
            .values()
            .any(|h| h.id != hotel.id && h.email == hotel.email)
        {
            return Err(AppError::Conflict("A hotel with this email already exists".to_string()));
        }
        let stored = state
            .hotels
            .get_mut(&hotel.id)
            .ok_or_else(|| AppError::hotel_not_found(hotel.id))?;
        stored.hotel_name = hotel.hotel_name.clone();
        stored.email = hotel.email.clone();
        stored.location = hotel.location.clone();
        stored.stay_types = hotel.stay_types.clone();
        stored.updated_at = hotel.updated_at;
        Ok(())
    }

    async fn hotels_delete(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.hotels.remove(&id).is_none() {
            return Err(AppError::hotel_not_found(id));
        }
        state.availability.retain(|(hotel_id, _), _| *hotel_id != id);
        Ok(())
    }

    async fn availability_get(
        &self,
        hotel_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyAvailability>> {
        if to < from {
            return Ok(Vec::new());
        }
        let state = self.state.read().await;
        Ok(state
            .availability
            .range((hotel_id, from)..=(hotel_id, to))
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn availability_save(&self, entries: &[DailyAvailability]) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.check_inventory(entries)?;
        state.write_inventory(entries);
        Ok(())
    }

    async fn bookings_get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        self.state
            .read()
            .await
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::booking_not_found(id))
    }

    async fn bookings_get_by_confirmation(&self, confirmation_number: &str) -> AppResult<Booking> {
        self.state
            .read()
            .await
            .bookings
            .values()
            .find(|b| b.confirmation_number == confirmation_number)
            .cloned()
            .ok_or_else(|| AppError::booking_not_found(confirmation_number))
    }

    async fn bookings_confirmation_exists(&self, confirmation_number: &str) -> AppResult<bool> {
        Ok(self
            .state
            .read()
            .await
            .bookings
            .values()
            .any(|b| b.confirmation_number == confirmation_number))
    }

    async fn bookings_list(&self, query: &BookingQuery, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| query.hotel_id.map_or(true, |id| b.hotel_id == id))
            .filter(|b| query.status.map_or(true, |s| b.status == s))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| {
            a.date_range
                .start_date
                .cmp(&b.date_range.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(bookings
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn bookings_count_for_hotel(&self, hotel_id: Uuid) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state.bookings.values().filter(|b| b.hotel_id == hotel_id).count() as i64)
    }

    async fn bookings_set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let mut state = self.state.write().await;
        let booking = state
            .bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::booking_not_found(id))?;
        booking.status = status;
        booking.updated_at = updated_at;
        Ok(booking.clone())
    }

    async fn bookings_commit(
        &self,
        inventory: &[DailyAvailability],
        change: BookingChange<'_>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.check_inventory(inventory)?;

        match change {
            BookingChange::Insert(booking) => {
                if !state.hotels.contains_key(&booking.hotel_id) {
                    return Err(AppError::hotel_not_found(booking.hotel_id));
                }
                if state
                    .bookings
                    .values()
                    .any(|b| b.confirmation_number == booking.confirmation_number)
                {
                    return Err(AppError::Conflict("Confirmation number already in use".to_string()));
                }
                if state.bookings.contains_key(&booking.id) {
                    return Err(AppError::Conflict(format!("Booking {} already exists", booking.id)));
                }
                state.write_inventory(inventory);
                state.bookings.insert(booking.id, booking.clone());
            }
            BookingChange::Update(booking) => {
                if !state.bookings.contains_key(&booking.id) {
                    return Err(AppError::booking_not_found(booking.id));
                }
                state.write_inventory(inventory);
                state.bookings.insert(booking.id, booking.clone());
            }
            BookingChange::Delete(id) => {
                if !state.bookings.contains_key(&id) {
                    return Err(AppError::booking_not_found(id));
                }
                state.write_inventory(inventory);
                state.bookings.remove(&id);
            }
        }
        Ok(())
    }
}
