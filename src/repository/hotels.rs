//! Hotel domain methods on PgRepository

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{postgres::PgRepository, unique_violation};
use crate::{
    error::{AppError, AppResult},
    models::{Hotel, RoomCounts, StayType},
};

/// Hotel row as stored
#[derive(Debug, FromRow)]
pub(crate) struct HotelRow {
    pub id: Uuid,
    pub hotel_name: String,
    pub email: String,
    pub location: String,
    pub single_rooms: i32,
    pub double_rooms: i32,
    pub triple_rooms: i32,
    pub family_rooms: i32,
    pub suite_rooms: i32,
    pub stay_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<HotelRow> for Hotel {
    type Error = AppError;

    fn try_from(row: HotelRow) -> Result<Self, Self::Error> {
        let stay_types = row
            .stay_types
            .iter()
            .map(|s| s.parse::<StayType>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::Internal)?;

        let room_details = RoomCounts {
            single: row.single_rooms,
            double: row.double_rooms,
            triple: row.triple_rooms,
            family: row.family_rooms,
            suite: row.suite_rooms,
        };

        Ok(Hotel {
            id: row.id,
            hotel_name: row.hotel_name,
            email: row.email,
            location: row.location,
            total_rooms: room_details.total(),
            room_details,
            stay_types,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn stay_type_labels(hotel: &Hotel) -> Vec<String> {
    hotel.stay_types.iter().map(|s| s.as_str().to_string()).collect()
}

impl PgRepository {
    /// Insert a hotel
    pub async fn hotels_insert(&self, hotel: &Hotel) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO hotels (
                id, hotel_name, email, location,
                single_rooms, double_rooms, triple_rooms, family_rooms, suite_rooms,
                stay_types, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(hotel.id)
        .bind(&hotel.hotel_name)
        .bind(&hotel.email)
        .bind(&hotel.location)
        .bind(hotel.room_details.single)
        .bind(hotel.room_details.double)
        .bind(hotel.room_details.triple)
        .bind(hotel.room_details.family)
        .bind(hotel.room_details.suite)
        .bind(stay_type_labels(hotel))
        .bind(hotel.created_at)
        .bind(hotel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "A hotel with this email already exists"))?;
        Ok(())
    }

    /// Get hotel by ID
    pub async fn hotels_fetch(&self, id: Uuid) -> AppResult<Hotel> {
        sqlx::query_as::<_, HotelRow>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::hotel_not_found(id))?
            .try_into()
    }

    /// List hotels by name
    pub async fn hotels_fetch_page(&self, limit: i64, offset: i64) -> AppResult<Vec<Hotel>> {
        sqlx::query_as::<_, HotelRow>(
            "SELECT * FROM hotels ORDER BY hotel_name, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Hotel::try_from)
        .collect()
    }

    /// Update descriptive hotel fields
    pub async fn hotels_store(&self, hotel: &Hotel) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE hotels
            SET hotel_name = $2, email = $3, location = $4, stay_types = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(hotel.id)
        .bind(&hotel.hotel_name)
        .bind(&hotel.email)
        .bind(&hotel.location)
        .bind(stay_type_labels(hotel))
        .bind(hotel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "A hotel with this email already exists"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::hotel_not_found(hotel.id));
        }
        Ok(())
    }

    /// Delete a hotel; availability rows cascade
    pub async fn hotels_remove(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::hotel_not_found(id));
        }
        Ok(())
    }
}
