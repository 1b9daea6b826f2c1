//! Friendship graph domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::user::{UserProfile, UserSummary};

/// Lifecycle of a friendship row. Only accepted rows count as friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Accepted => "ACCEPTED",
        }
    }
}

impl FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(FriendshipStatus::Pending),
            "ACCEPTED" => Ok(FriendshipStatus::Accepted),
            _ => Err(format!("Invalid friendship status: {}", s)),
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A friendship between two users. `user_a_id` is the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    /// Checks that `user_id` may accept or deny this request.
    ///
    /// Only the addressee of a pending request may act on it.
    pub fn ensure_addressee(&self, user_id: Uuid) -> DomainResult<()> {
        if self.user_b_id != user_id {
            return Err(DomainError::Forbidden(
                "Only the recipient can respond to this request".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks that the request can still be accepted.
    pub fn ensure_pending(&self) -> DomainResult<()> {
        match self.status {
            FriendshipStatus::Pending => Ok(()),
            FriendshipStatus::Accepted => {
                Err(DomainError::Conflict("Already friends".to_string()))
            }
        }
    }
}

/// Decides whether `requester` may send a new request to `addressee`, given the
/// row already stored for the pair (in either direction).
pub fn check_new_request(
    requester: Uuid,
    addressee: Uuid,
    existing: Option<&Friendship>,
) -> DomainResult<()> {
    if requester == addressee {
        return Err(DomainError::Validation(
            "You cannot send a friend request to yourself".to_string(),
        ));
    }

    match existing.map(|f| f.status) {
        Some(FriendshipStatus::Accepted) => {
            Err(DomainError::Conflict("Already friends".to_string()))
        }
        Some(FriendshipStatus::Pending) => {
            Err(DomainError::Conflict("Friend request already pending".to_string()))
        }
        None => Ok(()),
    }
}

/// Request payload for `POST /friends/request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    pub user_id: Uuid,
}

/// Request payload for `POST /friends/accept` and `POST /friends/deny`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondFriendRequest {
    pub request_id: Uuid,
}

/// A pending request as shown in the recipient's inbox.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedFriendRequest {
    pub id: Uuid,
    pub from: UserSummary,
}

/// Minimal view of a freshly created request.
#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestView {
    pub id: Uuid,
    pub status: FriendshipStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestResponse {
    pub request: FriendRequestView,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestsResponse {
    pub received: Vec<ReceivedFriendRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendshipResponse {
    pub friendship: Friendship,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendsResponse {
    pub friends: Vec<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friendship(a: Uuid, b: Uuid, status: FriendshipStatus) -> Friendship {
        Friendship {
            id: Uuid::new_v4(),
            user_a_id: a,
            user_b_id: b,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_new_request_rejects_self() {
        let a = Uuid::new_v4();
        assert!(matches!(
            check_new_request(a, a, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_check_new_request_conflicts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let accepted = friendship(b, a, FriendshipStatus::Accepted);
        assert!(matches!(
            check_new_request(a, b, Some(&accepted)),
            Err(DomainError::Conflict(_))
        ));

        let pending = friendship(a, b, FriendshipStatus::Pending);
        assert!(matches!(
            check_new_request(a, b, Some(&pending)),
            Err(DomainError::Conflict(_))
        ));

        assert!(check_new_request(a, b, None).is_ok());
    }

    #[test]
    fn test_only_addressee_may_respond() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let f = friendship(a, b, FriendshipStatus::Pending);
        assert!(f.ensure_addressee(b).is_ok());
        assert!(matches!(
            f.ensure_addressee(a),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn test_accepting_twice_conflicts() {
        let f = friendship(Uuid::new_v4(), Uuid::new_v4(), FriendshipStatus::Accepted);
        assert!(matches!(f.ensure_pending(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!(
            FriendshipStatus::from_str("accepted").unwrap(),
            FriendshipStatus::Accepted
        );
        assert_eq!(FriendshipStatus::Pending.to_string(), "PENDING");
        assert!(FriendshipStatus::from_str("blocked").is_err());
    }
}
