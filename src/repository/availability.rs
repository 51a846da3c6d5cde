//! Daily availability domain methods on PgRepository

use chrono::NaiveDate;
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use super::{postgres::PgRepository, stale_inventory};
use crate::{
    error::AppResult,
    models::{DailyAvailability, RoomCounts},
};

#[derive(Debug, FromRow)]
struct AvailabilityRow {
    hotel_id: Uuid,
    date: NaiveDate,
    single_rooms: i32,
    double_rooms: i32,
    triple_rooms: i32,
    family_rooms: i32,
    suite_rooms: i32,
    version: i64,
}

impl From<AvailabilityRow> for DailyAvailability {
    fn from(row: AvailabilityRow) -> Self {
        DailyAvailability {
            hotel_id: row.hotel_id,
            date: row.date,
            remaining: RoomCounts {
                single: row.single_rooms,
                double: row.double_rooms,
                triple: row.triple_rooms,
                family: row.family_rooms,
                suite: row.suite_rooms,
            },
            version: row.version,
        }
    }
}

impl PgRepository {
    /// Stored rows of a hotel between two days, inclusive
    pub async fn availability_fetch(
        &self,
        hotel_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyAvailability>> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT hotel_id, date, single_rooms, double_rooms, triple_rooms,
                   family_rooms, suite_rooms, version
            FROM room_availability
            WHERE hotel_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(hotel_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyAvailability::from).collect())
    }

    /// Write rows inside an open transaction, checking versions
    pub(crate) async fn availability_write(
        tx: &mut Transaction<'_, Postgres>,
        entries: &[DailyAvailability],
    ) -> AppResult<()> {
        for entry in entries {
            let r = &entry.remaining;
            let result = if entry.version == 0 {
                sqlx::query(
                    r#"
                    INSERT INTO room_availability (
                        hotel_id, date, single_rooms, double_rooms, triple_rooms,
                        family_rooms, suite_rooms, version
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, 1)
                    ON CONFLICT (hotel_id, date) DO NOTHING
                    "#,
                )
                .bind(entry.hotel_id)
                .bind(entry.date)
                .bind(r.single)
                .bind(r.double)
                .bind(r.triple)
                .bind(r.family)
                .bind(r.suite)
                .execute(&mut **tx)
                .await?
            } else {
                sqlx::query(
                    r#"
                    UPDATE room_availability
                    SET single_rooms = $3, double_rooms = $4, triple_rooms = $5,
                        family_rooms = $6, suite_rooms = $7, version = version + 1
                    WHERE hotel_id = $1 AND date = $2 AND version = $8
                    "#,
                )
                .bind(entry.hotel_id)
                .bind(entry.date)
                .bind(r.single)
                .bind(r.double)
                .bind(r.triple)
                .bind(r.family)
                .bind(r.suite)
                .bind(entry.version)
                .execute(&mut **tx)
                .await?
            };

            if result.rows_affected() == 0 {
                return Err(stale_inventory(entry));
            }
        }
        Ok(())
    }

    /// Write rows in their own transaction
    pub async fn availability_store(&self, entries: &[DailyAvailability]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::availability_write(&mut tx, entries).await?;
        tx.commit().await?;
        Ok(())
    }
}
