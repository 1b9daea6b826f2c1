//! Event entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::event::{
    Event, EventParticipant, ParticipantRole, ParticipantStatus, ParticipantView, ShoutView,
};
use domain::models::user::UserPublic;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for participant_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "UPPERCASE")]
pub enum ParticipantRoleDb {
    Host,
    Cohost,
    Guest,
}

impl From<ParticipantRoleDb> for ParticipantRole {
    fn from(db: ParticipantRoleDb) -> Self {
        match db {
            ParticipantRoleDb::Host => ParticipantRole::Host,
            ParticipantRoleDb::Cohost => ParticipantRole::Cohost,
            ParticipantRoleDb::Guest => ParticipantRole::Guest,
        }
    }
}

impl From<ParticipantRole> for ParticipantRoleDb {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Host => ParticipantRoleDb::Host,
            ParticipantRole::Cohost => ParticipantRoleDb::Cohost,
            ParticipantRole::Guest => ParticipantRoleDb::Guest,
        }
    }
}

/// Database enum for participant_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_status", rename_all = "UPPERCASE")]
pub enum ParticipantStatusDb {
    Invited,
    Interested,
    Joined,
    Declined,
}

impl From<ParticipantStatusDb> for ParticipantStatus {
    fn from(db: ParticipantStatusDb) -> Self {
        match db {
            ParticipantStatusDb::Invited => ParticipantStatus::Invited,
            ParticipantStatusDb::Interested => ParticipantStatus::Interested,
            ParticipantStatusDb::Joined => ParticipantStatus::Joined,
            ParticipantStatusDb::Declined => ParticipantStatus::Declined,
        }
    }
}

impl From<ParticipantStatus> for ParticipantStatusDb {
    fn from(status: ParticipantStatus) -> Self {
        match status {
            ParticipantStatus::Invited => ParticipantStatusDb::Invited,
            ParticipantStatus::Interested => ParticipantStatusDb::Interested,
            ParticipantStatus::Joined => ParticipantStatusDb::Joined,
            ParticipantStatus::Declined => ParticipantStatusDb::Declined,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub host_id: Uuid,
    pub activity: String,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub is_instant: bool,
    pub is_potential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            host_id: entity.host_id,
            activity: entity.activity,
            start_time: entity.start_time,
            location: entity.location,
            notes: entity.notes,
            image_url: entity.image_url,
            is_instant: entity.is_instant,
            is_potential: entity.is_potential,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the event_participants table.
#[derive(Debug, Clone, FromRow)]
pub struct EventParticipantEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub status: ParticipantStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventParticipantEntity> for EventParticipant {
    fn from(entity: EventParticipantEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Participant row joined with the user's public details.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantWithUserEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub status: ParticipantStatusDb,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_avatar_url: Option<String>,
}

impl From<ParticipantWithUserEntity> for ParticipantView {
    fn from(entity: ParticipantWithUserEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            role: entity.role.into(),
            status: entity.status.into(),
            created_at: entity.created_at,
            user: UserPublic {
                id: entity.user_id,
                name: entity.user_name,
                avatar_url: entity.user_avatar_url,
            },
        }
    }
}

/// Co-host row joined with the user's public details.
#[derive(Debug, Clone, FromRow)]
pub struct CohostWithUserEntity {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar_url: Option<String>,
}

impl From<CohostWithUserEntity> for UserPublic {
    fn from(entity: CohostWithUserEntity) -> Self {
        Self {
            id: entity.user_id,
            name: entity.user_name,
            avatar_url: entity.user_avatar_url,
        }
    }
}

/// Shout row joined with the author's public details.
#[derive(Debug, Clone, FromRow)]
pub struct ShoutWithUserEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_avatar_url: Option<String>,
}

impl From<ShoutWithUserEntity> for ShoutView {
    fn from(entity: ShoutWithUserEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            message: entity.message,
            created_at: entity.created_at,
            user: UserPublic {
                id: entity.user_id,
                name: entity.user_name,
                avatar_url: entity.user_avatar_url,
            },
        }
    }
}
