//! Availability day entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::availability::AvailabilityDay;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the availability_days table.
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityDayEntity {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub is_up: bool,
    pub up_text: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<AvailabilityDayEntity> for AvailabilityDay {
    fn from(entity: AvailabilityDayEntity) -> Self {
        Self {
            user_id: entity.user_id,
            date: entity.date,
            is_up: entity.is_up,
            up_text: entity.up_text,
        }
    }
}
