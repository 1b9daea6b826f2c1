//! Event routes.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::event::{
    CreateEventRequest, CreateShoutRequest, EventResponse, EventsResponse, NextEventResponse,
    ParticipantResponse, RespondRequest, ShoutResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, UserAuth};
use crate::services::EventService;

/// Create an event. The caller becomes its host and is joined immediately.
///
/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    request.validate()?;

    let event = EventService::new(state.pool.clone())
        .create(auth.user_id, request, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse { event })))
}

/// Events visible to the caller that started at most a day ago.
///
/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = EventService::new(state.pool.clone())
        .list(auth.user_id, Utc::now(), state.config.limits.max_events_listed)
        .await?;

    Ok(Json(EventsResponse { events }))
}

/// The caller's next upcoming event, or `null`.
///
/// GET /api/v1/events/next
pub async fn next_event(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<NextEventResponse>, ApiError> {
    let event = EventService::new(state.pool.clone())
        .next(auth.user_id, Utc::now())
        .await?;

    Ok(Json(NextEventResponse { event }))
}

/// A single event with participants and shouts.
///
/// GET /api/v1/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    auth: UserAuth,
    AppPath(event_id): AppPath<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = EventService::new(state.pool.clone())
        .get(auth.user_id, event_id)
        .await?;

    Ok(Json(EventResponse { event }))
}

/// Record the caller's response: interested, joined or declined.
///
/// POST /api/v1/events/:id/respond
pub async fn respond_to_event(
    State(state): State<AppState>,
    auth: UserAuth,
    AppPath(event_id): AppPath<Uuid>,
    AppJson(request): AppJson<RespondRequest>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    let participant = EventService::new(state.pool.clone())
        .respond(auth.user_id, event_id, request.status)
        .await?;

    Ok(Json(ParticipantResponse { participant }))
}

/// Post a short message on an event.
///
/// POST /api/v1/events/:id/shout
pub async fn shout(
    State(state): State<AppState>,
    auth: UserAuth,
    AppPath(event_id): AppPath<Uuid>,
    AppJson(request): AppJson<CreateShoutRequest>,
) -> Result<(StatusCode, Json<ShoutResponse>), ApiError> {
    request.validate()?;

    let shout = EventService::new(state.pool.clone())
        .shout(auth.user_id, event_id, &request.message)
        .await?;

    Ok((StatusCode::CREATED, Json(ShoutResponse { shout })))
}
