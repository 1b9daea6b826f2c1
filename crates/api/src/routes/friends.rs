//! Friend list and friend request routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::availability::OkResponse;
use domain::models::friendship::{
    check_new_request, FriendRequestResponse, FriendRequestView, FriendRequestsResponse,
    Friendship, FriendshipResponse, FriendsResponse, ReceivedFriendRequest, RespondFriendRequest,
    SendFriendRequest,
};
use domain::models::status::{StatusView, UserStatus};
use domain::models::user::{User, UserProfile};
use persistence::repositories::{FriendshipRepository, UserRepository, UserStatusRepository};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, UserAuth};
use crate::middleware::metrics::record_friend_request;

/// Accepted friends with their summary status, ordered by name.
///
/// GET /api/v1/friends
pub async fn list_friends(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<FriendsResponse>, ApiError> {
    let friends: Vec<User> = FriendshipRepository::new(state.pool.clone())
        .list_friends(auth.user_id)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let ids: Vec<Uuid> = friends.iter().map(|f| f.id).collect();
    let mut statuses: HashMap<Uuid, StatusView> = UserStatusRepository::new(state.pool.clone())
        .find_by_user_ids(&ids)
        .await?
        .into_iter()
        .map(|entity| {
            let status = UserStatus::from(entity);
            (status.user_id, StatusView::from(status))
        })
        .collect();

    let friends = friends
        .into_iter()
        .map(|user| {
            let status = statuses.remove(&user.id);
            UserProfile::from_user(user, status)
        })
        .collect();

    Ok(Json(FriendsResponse { friends }))
}

/// Pending requests addressed to the caller, newest first.
///
/// GET /api/v1/friends/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<FriendRequestsResponse>, ApiError> {
    let received = FriendshipRepository::new(state.pool.clone())
        .received_requests(auth.user_id)
        .await?
        .into_iter()
        .map(ReceivedFriendRequest::from)
        .collect();

    Ok(Json(FriendRequestsResponse { received }))
}

/// Send a friend request.
///
/// POST /api/v1/friends/request
pub async fn send_request(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<SendFriendRequest>,
) -> Result<(StatusCode, Json<FriendRequestResponse>), ApiError> {
    let friendships = FriendshipRepository::new(state.pool.clone());

    if request.user_id != auth.user_id {
        UserRepository::new(state.pool.clone())
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    }

    let existing: Option<Friendship> = friendships
        .find_between(auth.user_id, request.user_id)
        .await?
        .map(Into::into);
    check_new_request(auth.user_id, request.user_id, existing.as_ref())?;

    let created: Friendship = friendships
        .create_request(auth.user_id, request.user_id)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::Conflict("Friend request already pending".to_string())
            }
            _ => ApiError::from(e),
        })?
        .into();

    record_friend_request("sent");
    info!(
        request_id = %created.id,
        from = %auth.user_id,
        to = %request.user_id,
        "Friend request sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(FriendRequestResponse {
            request: FriendRequestView {
                id: created.id,
                status: created.status,
            },
        }),
    ))
}

/// Accept a pending request addressed to the caller.
///
/// POST /api/v1/friends/accept
pub async fn accept_request(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<RespondFriendRequest>,
) -> Result<Json<FriendshipResponse>, ApiError> {
    let friendships = FriendshipRepository::new(state.pool.clone());
    let pending = load_request(&friendships, request.request_id).await?;
    pending.ensure_addressee(auth.user_id)?;
    pending.ensure_pending()?;

    let friendship: Friendship = friendships
        .accept(pending.id)
        .await?
        .ok_or_else(|| ApiError::Conflict("Already friends".to_string()))?
        .into();

    record_friend_request("accepted");
    info!(request_id = %friendship.id, user_id = %auth.user_id, "Friend request accepted");

    Ok(Json(FriendshipResponse { friendship }))
}

/// Deny (delete) a pending request addressed to the caller.
///
/// POST /api/v1/friends/deny
pub async fn deny_request(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<RespondFriendRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let friendships = FriendshipRepository::new(state.pool.clone());
    let pending = load_request(&friendships, request.request_id).await?;
    pending.ensure_addressee(auth.user_id)?;
    pending.ensure_pending()?;

    if !friendships.delete_pending(pending.id).await? {
        return Err(ApiError::NotFound("Friend request not found".to_string()));
    }

    record_friend_request("denied");
    info!(request_id = %pending.id, user_id = %auth.user_id, "Friend request denied");

    Ok(Json(OkResponse { ok: true }))
}

async fn load_request(
    friendships: &FriendshipRepository,
    request_id: Uuid,
) -> Result<Friendship, ApiError> {
    friendships
        .find_by_id(request_id)
        .await?
        .map(Friendship::from)
        .ok_or_else(|| ApiError::NotFound("Friend request not found".to_string()))
}
