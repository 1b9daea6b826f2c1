//! User and profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::status::StatusView;

/// Minimum query length for live user search.
pub const MIN_SEARCH_QUERY_LENGTH: usize = 3;

/// Represents a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub home_location: Option<String>,
    pub custom_location: Option<String>,
    pub use_custom_location: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The location label currently in effect for this user.
    pub fn effective_location(&self) -> Option<&str> {
        if self.use_custom_location {
            self.custom_location.as_deref()
        } else {
            self.home_location.as_deref()
        }
    }
}

/// Public user info embedded in other resources (no email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// User info returned by search results and friend requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// The caller's own profile, or a friend's profile in the friends list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub home_location: Option<String>,
    pub custom_location: Option<String>,
    pub use_custom_location: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusView>,
}

impl UserProfile {
    pub fn from_user(user: User, status: Option<StatusView>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            bio: user.bio,
            avatar_url: user.avatar_url,
            home_location: user.home_location,
            custom_location: user.custom_location,
            use_custom_location: user.use_custom_location,
            status,
        }
    }
}

/// Request payload for updating the caller's profile.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 280, message = "Bio must be at most 280 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 512, message = "Avatar URL must be at most 512 characters"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 80, message = "Home location must be at most 80 characters"))]
    pub home_location: Option<String>,

    #[validate(length(max = 80, message = "Custom location must be at most 80 characters"))]
    pub custom_location: Option<String>,

    pub use_custom_location: Option<bool>,
}

/// Query parameters for user search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchQuery {
    pub q: Option<String>,
}

impl UserSearchQuery {
    /// Returns the trimmed query when it is long enough to run.
    pub fn effective_query(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| q.chars().count() >= MIN_SEARCH_QUERY_LENGTH)
    }
}

/// Response for `GET /me` and `PUT /profile`.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub user: UserProfile,
}

/// Response for user search.
#[derive(Debug, Clone, Serialize)]
pub struct UserSearchResponse {
    pub users: Vec<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            password_hash: "$argon2id$secret".to_string(),
            bio: None,
            avatar_url: None,
            home_location: Some("Home".to_string()),
            custom_location: Some("Cabin".to_string()),
            use_custom_location: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_password_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("useCustomLocation"));
    }

    #[test]
    fn test_effective_location_follows_flag() {
        let mut user = sample_user();
        assert_eq!(user.effective_location(), Some("Home"));
        user.use_custom_location = true;
        assert_eq!(user.effective_location(), Some("Cabin"));
    }

    #[test]
    fn test_update_profile_validation() {
        let ok = UpdateProfileRequest {
            bio: Some("Sauna enthusiast".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let too_long = UpdateProfileRequest {
            home_location: Some("x".repeat(81)),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_search_query_minimum_length() {
        let short = UserSearchQuery {
            q: Some(" al ".to_string()),
        };
        assert_eq!(short.effective_query(), None);

        let ok = UserSearchQuery {
            q: Some(" ali ".to_string()),
        };
        assert_eq!(ok.effective_query(), Some("ali"));

        assert_eq!(UserSearchQuery::default().effective_query(), None);
    }

    #[test]
    fn test_profile_omits_missing_status() {
        let profile = UserProfile::from_user(sample_user(), None);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("status").is_none());
        assert!(json.get("email").is_some());
    }
}
