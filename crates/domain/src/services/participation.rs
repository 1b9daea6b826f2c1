//! Participant lifecycle and event creation rules.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::event::{
    CreateEventRequest, EventParticipant, NewEvent, NewParticipant, ParticipantRole,
    ParticipantStatus, RespondStatus,
};
use shared::validation::normalize_optional_text;

/// Next status for a participant.
///
/// Any of the three response states may follow any status, so the requested
/// state always wins. `Invited` cannot be requested.
pub fn transition(_current: ParticipantStatus, requested: RespondStatus) -> ParticipantStatus {
    requested.into()
}

/// Applies a response to the caller's participant row.
///
/// Only users with a row may respond; the role is never changed.
pub fn respond(
    existing: Option<&EventParticipant>,
    requested: RespondStatus,
) -> DomainResult<EventParticipant> {
    let participant = existing
        .ok_or_else(|| DomainError::NotFound("You are not invited to this event".to_string()))?;

    Ok(EventParticipant {
        status: transition(participant.status, requested),
        ..participant.clone()
    })
}

/// Start time for a new event. Instant events start now, whatever was sent.
pub fn resolve_start_time(
    is_instant: bool,
    supplied: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DomainResult<DateTime<Utc>> {
    if is_instant {
        return Ok(now);
    }
    supplied.ok_or_else(|| {
        DomainError::Validation("startTime is required unless the event is instant".to_string())
    })
}

/// Participant rows and co-host list for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantPlan {
    pub cohost_ids: Vec<Uuid>,
    pub participants: Vec<NewParticipant>,
}

/// Lays out the initial participants of an event.
///
/// The host comes first and is joined. Co-hosts are joined. Invitees who are
/// not co-hosts start as invited guests. The host never appears twice and
/// duplicate ids collapse, keeping first-seen order.
pub fn plan_participants(host: Uuid, cohost_ids: &[Uuid], invitee_ids: &[Uuid]) -> ParticipantPlan {
    let mut seen: HashSet<Uuid> = HashSet::from([host]);

    let cohosts: Vec<Uuid> = cohost_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();
    let guests: Vec<Uuid> = invitee_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let mut participants = Vec::with_capacity(1 + cohosts.len() + guests.len());
    participants.push(NewParticipant {
        user_id: host,
        role: ParticipantRole::Host,
        status: ParticipantStatus::Joined,
    });
    participants.extend(cohosts.iter().map(|&user_id| NewParticipant {
        user_id,
        role: ParticipantRole::Cohost,
        status: ParticipantStatus::Joined,
    }));
    participants.extend(guests.into_iter().map(|user_id| NewParticipant {
        user_id,
        role: ParticipantRole::Guest,
        status: ParticipantStatus::Invited,
    }));

    ParticipantPlan {
        cohost_ids: cohosts,
        participants,
    }
}

/// Turns a validated create request into the rows to insert.
pub fn plan_event(host: Uuid, request: CreateEventRequest, now: DateTime<Utc>) -> DomainResult<NewEvent> {
    let start_time = resolve_start_time(request.is_instant, request.start_time, now)?;
    let plan = plan_participants(host, &request.cohost_ids, &request.invitee_ids);

    Ok(NewEvent {
        host_id: host,
        activity: request.activity.trim().to_string(),
        start_time,
        location: normalize_optional_text(request.location.as_deref()),
        notes: normalize_optional_text(request.notes.as_deref()),
        image_url: normalize_optional_text(request.image_url.as_deref()),
        is_instant: request.is_instant,
        is_potential: request.is_potential,
        cohost_ids: plan.cohost_ids,
        participants: plan.participants,
    })
}
