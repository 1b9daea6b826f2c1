//! Availability repository for database operations.

use chrono::NaiveDate;
use domain::models::availability::AvailabilityDay;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AvailabilityDayEntity;
use crate::metrics::QueryTimer;

/// Repository for per-day availability rows.
#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    /// Creates a new AvailabilityRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All rows for `user_ids` with `start <= date < end`, in one read.
    pub async fn find_in_range(
        &self,
        user_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityDayEntity>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_availability_in_range");
        let result = sqlx::query_as::<_, AvailabilityDayEntity>(
            r#"
            SELECT user_id, date, is_up, up_text, updated_at
            FROM availability_days
            WHERE user_id = ANY($1) AND date >= $2 AND date < $3
            ORDER BY user_id, date
            "#,
        )
        .bind(user_ids)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert a batch of days in a single transaction.
    ///
    /// Either every row is written or none is.
    pub async fn upsert_days(&self, days: &[AvailabilityDay]) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("upsert_availability_days");
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for day in days {
            let result = sqlx::query(
                r#"
                INSERT INTO availability_days (user_id, date, is_up, up_text, updated_at)
                VALUES ($1, $2, $3, $4, NOW())
                ON CONFLICT (user_id, date) DO UPDATE
                SET is_up = EXCLUDED.is_up,
                    up_text = EXCLUDED.up_text,
                    updated_at = NOW()
                "#,
            )
            .bind(day.user_id)
            .bind(day.date)
            .bind(day.is_up)
            .bind(day.up_text.as_deref())
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        timer.record();
        Ok(written)
    }
}
