//! Friends' availability calendars.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use domain::models::availability::{
    AvailabilityDay, FriendCalendar, FriendCalendarQuery, FriendCalendarResponse,
};
use domain::models::user::UserPublic;
use domain::services::{materialize, visible_friend_ids, CalendarWindow};
use persistence::repositories::{AvailabilityRepository, FriendshipRepository, UserRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Dense calendars for the requested friends, ordered by name.
///
/// Ids that are not accepted friends of the caller are left out silently.
///
/// GET /api/v1/calendar/friends?ids=<csv>
pub async fn friends_calendar(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<FriendCalendarQuery>,
) -> Result<Json<FriendCalendarResponse>, ApiError> {
    let window = CalendarWindow::starting_today(Utc::now());
    let start = window.start_instant();

    let requested = query.requested_ids();
    if requested.is_empty() {
        return Ok(Json(FriendCalendarResponse {
            start,
            friends: Vec::new(),
        }));
    }

    let friend_ids = FriendshipRepository::new(state.pool.clone())
        .accepted_friend_ids(auth.user_id)
        .await?;
    let targets = visible_friend_ids(auth.user_id, &requested, &friend_ids);
    if targets.is_empty() {
        return Ok(Json(FriendCalendarResponse {
            start,
            friends: Vec::new(),
        }));
    }

    let users: Vec<UserPublic> = UserRepository::new(state.pool.clone())
        .find_public_by_ids(&targets)
        .await?
        .into_iter()
        .map(UserPublic::from)
        .collect();

    let rows: Vec<AvailabilityDay> = AvailabilityRepository::new(state.pool.clone())
        .find_in_range(&targets, window.start, window.end())
        .await?
        .into_iter()
        .map(AvailabilityDay::from)
        .collect();

    let mut calendars = materialize(&targets, &rows, window);
    let friends = users
        .into_iter()
        .filter_map(|user| {
            let days = calendars.remove(&user.id)?;
            Some(FriendCalendar {
                id: user.id,
                name: user.name,
                avatar_url: user.avatar_url,
                days,
            })
        })
        .collect();

    Ok(Json(FriendCalendarResponse { start, friends }))
}
