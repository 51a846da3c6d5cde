//! Hotel registry service

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::locks::HotelLocks;
use crate::{
    error::{AppError, AppResult},
    models::{
        hotel::{CreateHotel, HotelQuery, UpdateHotel},
        rooms::MAX_ROOMS_PER_TYPE,
        Hotel,
    },
    repository::DynRepository,
};

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

#[derive(Clone)]
pub struct HotelsService {
    repository: DynRepository,
    locks: HotelLocks,
}

impl HotelsService {
    pub fn new(repository: DynRepository, locks: HotelLocks) -> Self {
        Self { repository, locks }
    }

    /// Register a hotel with its baseline capacity
    pub async fn create(&self, request: CreateHotel) -> AppResult<Hotel> {
        request.validate()?;
        if let Some(room_type) = request.room_details.first_negative() {
            return Err(AppError::Validation(format!(
                "Room count for {} cannot be negative",
                room_type
            )));
        }
        if let Some(room_type) = request.room_details.first_oversized() {
            return Err(AppError::Validation(format!(
                "Room count for {} cannot exceed {}",
                room_type, MAX_ROOMS_PER_TYPE
            )));
        }

        let now = Utc::now();
        let hotel = Hotel {
            id: Uuid::new_v4(),
            hotel_name: request.hotel_name,
            email: request.email,
            location: request.location,
            total_rooms: request.room_details.total(),
            room_details: request.room_details,
            stay_types: request.stay_types,
            created_at: now,
            updated_at: now,
        };

        self.repository.hotels_create(&hotel).await?;
        tracing::info!("Created hotel {} ({})", hotel.hotel_name, hotel.id);
        Ok(hotel)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Hotel> {
        self.repository.hotels_get_by_id(id).await
    }

    /// List hotels by name, one page at a time
    pub async fn list(&self, query: &HotelQuery) -> AppResult<Vec<Hotel>> {
        let (limit, offset) = page_bounds(query.page, query.per_page)?;
        self.repository.hotels_list(limit, offset).await
    }

    /// Change descriptive fields; capacity stays as created
    pub async fn update(&self, id: Uuid, request: UpdateHotel) -> AppResult<Hotel> {
        request.validate()?;

        let mut hotel = self.repository.hotels_get_by_id(id).await?;
        if let Some(name) = request.hotel_name {
            hotel.hotel_name = name;
        }
        if let Some(email) = request.email {
            hotel.email = email;
        }
        if let Some(location) = request.location {
            hotel.location = location;
        }
        if let Some(stay_types) = request.stay_types {
            hotel.stay_types = stay_types;
        }
        hotel.updated_at = Utc::now();

        self.repository.hotels_update(&hotel).await?;
        Ok(hotel)
    }

    /// Delete a hotel that has no bookings left
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let guard = self.locks.acquire(id).await;

        self.repository.hotels_get_by_id(id).await?;
        let bookings = self.repository.bookings_count_for_hotel(id).await?;
        if bookings > 0 {
            return Err(AppError::Conflict(format!(
                "Hotel {} still has {} booking(s)",
                id, bookings
            )));
        }

        self.repository.hotels_delete(id).await?;
        drop(guard);
        self.locks.forget(id);

        tracing::info!("Deleted hotel {}", id);
        Ok(())
    }
}

/// Convert 1-based page parameters into a limit and offset
pub(crate) fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> AppResult<(i64, i64)> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = page.unwrap_or(1).max(1);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| AppError::Validation(format!("Page {} is out of range", page)))?;
    Ok((per_page, offset))
}
