//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::user::{User, UserPublic, UserSummary};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub home_location: Option<String>,
    pub custom_location: Option<String>,
    pub use_custom_location: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            home_location: entity.home_location,
            custom_location: entity.custom_location,
            use_custom_location: entity.use_custom_location,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Narrow projection used by search results and friend request inboxes.
#[derive(Debug, Clone, FromRow)]
pub struct UserSummaryEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<UserSummaryEntity> for UserSummary {
    fn from(entity: UserSummaryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            avatar_url: entity.avatar_url,
        }
    }
}

/// Public projection (no email).
#[derive(Debug, Clone, FromRow)]
pub struct UserPublicEntity {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<UserPublicEntity> for UserPublic {
    fn from(entity: UserPublicEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            avatar_url: entity.avatar_url,
        }
    }
}
