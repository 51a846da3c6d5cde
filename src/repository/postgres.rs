//! PostgreSQL-backed repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{BookingChange, Repository};
use crate::{
    error::AppResult,
    models::{booking::BookingQuery, Booking, BookingStatus, DailyAvailability, Hotel},
};

/// Repository holding the database connection pool
#[derive(Clone)]
pub struct PgRepository {
    pub pool: Pool<Postgres>,
}

impl PgRepository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn hotels_create(&self, hotel: &Hotel) -> AppResult<()> {
        self.hotels_insert(hotel).await
    }

    async fn hotels_get_by_id(&self, id: Uuid) -> AppResult<Hotel> {
        self.hotels_fetch(id).await
    }

    async fn hotels_list(&self, limit: i64, offset: i64) -> AppResult<Vec<Hotel>> {
        self.hotels_fetch_page(limit, offset).await
    }

    async fn hotels_update(&self, hotel: &Hotel) -> AppResult<()> {
        self.hotels_store(hotel).await
    }

    async fn hotels_delete(&self, id: Uuid) -> AppResult<()> {
        self.hotels_remove(id).await
    }

    async fn availability_get(
        &self,
        hotel_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyAvailability>> {
        self.availability_fetch(hotel_id, from, to).await
    }

    async fn availability_save(&self, entries: &[DailyAvailability]) -> AppResult<()> {
        self.availability_store(entries).await
    }

    async fn bookings_get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings_fetch(id).await
    }

    async fn bookings_get_by_confirmation(&self, confirmation_number: &str) -> AppResult<Booking> {
        self.bookings_fetch_by_confirmation(confirmation_number).await
    }

    async fn bookings_confirmation_exists(&self, confirmation_number: &str) -> AppResult<bool> {
        self.bookings_confirmation_taken(confirmation_number).await
    }

    async fn bookings_list(&self, query: &BookingQuery, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        self.bookings_fetch_page(query, limit, offset).await
    }

    async fn bookings_count_for_hotel(&self, hotel_id: Uuid) -> AppResult<i64> {
        self.bookings_count_by_hotel(hotel_id).await
    }

    async fn bookings_set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        self.bookings_store_status(id, status, updated_at).await
    }

    async fn bookings_commit(
        &self,
        inventory: &[DailyAvailability],
        change: BookingChange<'_>,
    ) -> AppResult<()> {
        self.bookings_apply(inventory, change).await
    }
}
