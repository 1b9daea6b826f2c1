//! Friendship entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::friendship::{Friendship, FriendshipStatus, ReceivedFriendRequest};
use domain::models::user::UserSummary;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for friendship_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "friendship_status", rename_all = "UPPERCASE")]
pub enum FriendshipStatusDb {
    Pending,
    Accepted,
}

impl From<FriendshipStatusDb> for FriendshipStatus {
    fn from(db: FriendshipStatusDb) -> Self {
        match db {
            FriendshipStatusDb::Pending => FriendshipStatus::Pending,
            FriendshipStatusDb::Accepted => FriendshipStatus::Accepted,
        }
    }
}

impl From<FriendshipStatus> for FriendshipStatusDb {
    fn from(status: FriendshipStatus) -> Self {
        match status {
            FriendshipStatus::Pending => FriendshipStatusDb::Pending,
            FriendshipStatus::Accepted => FriendshipStatusDb::Accepted,
        }
    }
}

/// Database row mapping for the friendships table.
#[derive(Debug, Clone, FromRow)]
pub struct FriendshipEntity {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub status: FriendshipStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FriendshipEntity> for Friendship {
    fn from(entity: FriendshipEntity) -> Self {
        Self {
            id: entity.id,
            user_a_id: entity.user_a_id,
            user_b_id: entity.user_b_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A pending request joined with the requester's details.
#[derive(Debug, Clone, FromRow)]
pub struct ReceivedRequestEntity {
    pub id: Uuid,
    pub from_id: Uuid,
    pub from_name: String,
    pub from_email: String,
    pub from_avatar_url: Option<String>,
}

impl From<ReceivedRequestEntity> for ReceivedFriendRequest {
    fn from(entity: ReceivedRequestEntity) -> Self {
        Self {
            id: entity.id,
            from: UserSummary {
                id: entity.from_id,
                name: entity.from_name,
                email: entity.from_email,
                avatar_url: entity.from_avatar_url,
            },
        }
    }
}
