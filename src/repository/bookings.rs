//! Booking domain methods on PgRepository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use super::{postgres::PgRepository, unique_violation, BookingChange};
use crate::{
    error::{AppError, AppResult},
    models::{
        booking::BookingQuery, Booking, BookingStatus, Customer, DailyAvailability, Guests,
        RoomLine, RoomSelection, StayDates,
    },
};

/// Booking row as stored, room lines flattened into columns
#[derive(Debug, FromRow)]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub adults: i32,
    pub children: i32,
    pub single_count: i32,
    pub single_price: Decimal,
    pub double_count: i32,
    pub double_price: Decimal,
    pub triple_count: i32,
    pub triple_price: Decimal,
    pub family_count: i32,
    pub family_price: Decimal,
    pub suite_count: i32,
    pub suite_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub stay_type: String,
    pub special_requests: Option<String>,
    pub total_price: Decimal,
    pub confirmation_number: String,
    pub status: String,
    pub low_availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let line = |count, price_per_room| RoomLine { count, price_per_room };

        Ok(Booking {
            id: row.id,
            hotel_id: row.hotel_id,
            hotel_name: row.hotel_name,
            customer: Customer {
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
            guests: Guests {
                adults: row.adults,
                children: row.children,
            },
            rooms: RoomSelection {
                single: line(row.single_count, row.single_price),
                double: line(row.double_count, row.double_price),
                triple: line(row.triple_count, row.triple_price),
                family: line(row.family_count, row.family_price),
                suite: line(row.suite_count, row.suite_price),
            },
            date_range: StayDates {
                start_date: row.start_date,
                end_date: row.end_date,
            },
            stay_type: row.stay_type.parse().map_err(AppError::Internal)?,
            special_requests: row.special_requests,
            total_price: row.total_price,
            confirmation_number: row.confirmation_number,
            status: row.status.parse().map_err(AppError::Internal)?,
            low_availability: row.low_availability,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgRepository {
    /// Get booking by ID
    pub async fn bookings_fetch(&self, id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::booking_not_found(id))?
            .try_into()
    }

    /// Get booking by confirmation number
    pub async fn bookings_fetch_by_confirmation(&self, confirmation_number: &str) -> AppResult<Booking> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE confirmation_number = $1")
            .bind(confirmation_number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::booking_not_found(confirmation_number))?
            .try_into()
    }

    pub async fn bookings_confirmation_taken(&self, confirmation_number: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE confirmation_number = $1)",
        )
        .bind(confirmation_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// List bookings, optionally filtered by hotel and status
    pub async fn bookings_fetch_page(
        &self,
        query: &BookingQuery,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::uuid IS NULL OR hotel_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY start_date, created_at
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.hotel_id)
        .bind(query.status.map(|s| s.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Booking::try_from)
        .collect()
    }

    pub async fn bookings_count_by_hotel(&self, hotel_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE hotel_id = $1")
            .bind(hotel_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Change booking status only
    pub async fn bookings_store_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::booking_not_found(id))?
        .try_into()
    }

    /// Commit inventory rows and a booking change in one transaction
    pub async fn bookings_apply(
        &self,
        inventory: &[DailyAvailability],
        change: BookingChange<'_>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        Self::availability_write(&mut tx, inventory).await?;

        match change {
            BookingChange::Insert(booking) => Self::booking_insert(&mut tx, booking).await?,
            BookingChange::Update(booking) => Self::booking_update(&mut tx, booking).await?,
            BookingChange::Delete(id) => {
                let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(AppError::booking_not_found(id));
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn booking_insert(tx: &mut Transaction<'_, Postgres>, booking: &Booking) -> AppResult<()> {
        let rooms = &booking.rooms;
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, hotel_id, hotel_name, customer_name, customer_email, customer_phone,
                adults, children,
                single_count, single_price, double_count, double_price,
                triple_count, triple_price, family_count, family_price,
                suite_count, suite_price,
                start_date, end_date, stay_type, special_requests, total_price,
                confirmation_number, status, low_availability, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
            "#,
        )
        .bind(booking.id)
        .bind(booking.hotel_id)
        .bind(&booking.hotel_name)
        .bind(&booking.customer.name)
        .bind(&booking.customer.email)
        .bind(&booking.customer.phone)
        .bind(booking.guests.adults)
        .bind(booking.guests.children)
        .bind(rooms.single.count)
        .bind(rooms.single.price_per_room)
        .bind(rooms.double.count)
        .bind(rooms.double.price_per_room)
        .bind(rooms.triple.count)
        .bind(rooms.triple.price_per_room)
        .bind(rooms.family.count)
        .bind(rooms.family.price_per_room)
        .bind(rooms.suite.count)
        .bind(rooms.suite.price_per_room)
        .bind(booking.date_range.start_date)
        .bind(booking.date_range.end_date)
        .bind(booking.stay_type.as_str())
        .bind(&booking.special_requests)
        .bind(booking.total_price)
        .bind(&booking.confirmation_number)
        .bind(booking.status.as_str())
        .bind(booking.low_availability)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| unique_violation(e, "Confirmation number already in use"))?;
        Ok(())
    }

    async fn booking_update(tx: &mut Transaction<'_, Postgres>, booking: &Booking) -> AppResult<()> {
        let rooms = &booking.rooms;
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                customer_name = $2, customer_email = $3, customer_phone = $4,
                adults = $5, children = $6,
                single_count = $7, single_price = $8, double_count = $9, double_price = $10,
                triple_count = $11, triple_price = $12, family_count = $13, family_price = $14,
                suite_count = $15, suite_price = $16,
                start_date = $17, end_date = $18, stay_type = $19, special_requests = $20,
                total_price = $21, status = $22, low_availability = $23, updated_at = $24
            WHERE id = $1
            "#,
        )
        .bind(booking.id)
        .bind(&booking.customer.name)
        .bind(&booking.customer.email)
        .bind(&booking.customer.phone)
        .bind(booking.guests.adults)
        .bind(booking.guests.children)
        .bind(rooms.single.count)
        .bind(rooms.single.price_per_room)
        .bind(rooms.double.count)
        .bind(rooms.double.price_per_room)
        .bind(rooms.triple.count)
        .bind(rooms.triple.price_per_room)
        .bind(rooms.family.count)
        .bind(rooms.family.price_per_room)
        .bind(rooms.suite.count)
        .bind(rooms.suite.price_per_room)
        .bind(booking.date_range.start_date)
        .bind(booking.date_range.end_date)
        .bind(booking.stay_type.as_str())
        .bind(&booking.special_requests)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.low_availability)
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::booking_not_found(booking.id));
        }
        Ok(())
    }
}
