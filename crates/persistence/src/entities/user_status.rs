//! User status entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::status::{StatusMode, UserStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for status_mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "status_mode", rename_all = "UPPERCASE")]
pub enum StatusModeDb {
    Off,
    General,
    Specific,
}

impl From<StatusModeDb> for StatusMode {
    fn from(db: StatusModeDb) -> Self {
        match db {
            StatusModeDb::Off => StatusMode::Off,
            StatusModeDb::General => StatusMode::General,
            StatusModeDb::Specific => StatusMode::Specific,
        }
    }
}

impl From<StatusMode> for StatusModeDb {
    fn from(mode: StatusMode) -> Self {
        match mode {
            StatusMode::Off => StatusModeDb::Off,
            StatusMode::General => StatusModeDb::General,
            StatusMode::Specific => StatusModeDb::Specific,
        }
    }
}

/// Database row mapping for the user_statuses table.
#[derive(Debug, Clone, FromRow)]
pub struct UserStatusEntity {
    pub user_id: Uuid,
    pub mode: StatusModeDb,
    pub text: Option<String>,
    pub revision: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<UserStatusEntity> for UserStatus {
    fn from(entity: UserStatusEntity) -> Self {
        Self {
            user_id: entity.user_id,
            mode: entity.mode.into(),
            text: entity.text,
            revision: entity.revision,
            updated_at: entity.updated_at,
        }
    }
}
