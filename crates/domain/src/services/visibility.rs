//! Visibility predicates for events and friend availability.
//!
//! A caller who may not see something is treated as if it did not exist.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// How far back event listings reach.
pub const LISTING_LOOKBACK_HOURS: i64 = 24;

/// The membership facts that decide who can see an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventAccess {
    pub host_id: Uuid,
    pub cohost_ids: Vec<Uuid>,
    pub participant_ids: Vec<Uuid>,
}

impl EventAccess {
    /// True when `user_id` hosts, co-hosts, or has any participant row
    /// (declined included).
    pub fn can_view(&self, user_id: Uuid) -> bool {
        self.host_id == user_id
            || self.cohost_ids.contains(&user_id)
            || self.participant_ids.contains(&user_id)
    }
}

/// Filters requested ids down to the caller's accepted friends.
///
/// First-seen order is kept and duplicates collapse. The caller's own id and
/// anything not in `friend_ids` are dropped without error.
pub fn visible_friend_ids(caller: Uuid, requested: &[Uuid], friend_ids: &[Uuid]) -> Vec<Uuid> {
    let friends: HashSet<&Uuid> = friend_ids.iter().collect();
    let mut seen = HashSet::new();

    requested
        .iter()
        .copied()
        .filter(|id| *id != caller && friends.contains(id))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Earliest start time an event may have to appear in listings.
pub fn listing_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(LISTING_LOOKBACK_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_can_view() {
        let host = Uuid::new_v4();
        let access = EventAccess {
            host_id: host,
            ..Default::default()
        };
        assert!(access.can_view(host));
        assert!(!access.can_view(Uuid::new_v4()));
    }

    #[test]
    fn test_cohost_without_participant_row_can_view() {
        let cohost = Uuid::new_v4();
        let access = EventAccess {
            host_id: Uuid::new_v4(),
            cohost_ids: vec![cohost],
            participant_ids: vec![],
        };
        assert!(access.can_view(cohost));
    }

    #[test]
    fn test_any_participant_can_view() {
        let guest = Uuid::new_v4();
        let access = EventAccess {
            host_id: Uuid::new_v4(),
            cohost_ids: vec![],
            participant_ids: vec![guest],
        };
        assert!(access.can_view(guest));
    }

    #[test]
    fn test_visible_friend_ids_drops_non_friends_and_self() {
        let caller = Uuid::new_v4();
        let friend_a = Uuid::new_v4();
        let friend_b = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let visible = visible_friend_ids(
            caller,
            &[stranger, friend_b, caller, friend_a, friend_b],
            &[friend_a, friend_b, caller],
        );

        assert_eq!(visible, vec![friend_b, friend_a]);
    }

    #[test]
    fn test_visible_friend_ids_empty_inputs() {
        let caller = Uuid::new_v4();
        assert!(visible_friend_ids(caller, &[], &[Uuid::new_v4()]).is_empty());
        assert!(visible_friend_ids(caller, &[Uuid::new_v4()], &[]).is_empty());
    }

    #[test]
    fn test_listing_cutoff_is_one_day_back() {
        let now: DateTime<Utc> = "2026-03-02T12:00:00Z".parse().unwrap();
        assert_eq!(
            listing_cutoff(now),
            "2026-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
