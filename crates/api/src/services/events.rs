//! Event coordination: loading visible events and applying participant actions.

use chrono::{DateTime, Utc};
use domain::models::event::{
    CreateEventRequest, Event, EventParticipant, EventView, ParticipantView, RespondStatus,
    ShoutView,
};
use domain::models::user::UserPublic;
use domain::services::{listing_cutoff, participation, respond};
use persistence::entities::EventEntity;
use persistence::repositories::{EventRepository, UserRepository};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::{record_event_created, record_participant_response};

const EVENT_NOT_FOUND: &str = "Event not found";

pub struct EventService {
    events: EventRepository,
    users: UserRepository,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Creates an event with its host, co-hosts and invitees.
    pub async fn create(
        &self,
        host: Uuid,
        request: CreateEventRequest,
        now: DateTime<Utc>,
    ) -> Result<EventView, ApiError> {
        let new_event = participation::plan_event(host, request, now)?;
        let entity = self.events.create(&new_event).await?;

        record_event_created(new_event.is_instant);
        info!(
            event_id = %entity.id,
            host_id = %host,
            participants = new_event.participants.len(),
            "Event created"
        );

        self.assemble(host, vec![entity])
            .await?
            .pop()
            .ok_or_else(|| ApiError::Internal("Created event could not be loaded".to_string()))
    }

    /// Visible events starting no earlier than a day ago, earliest first.
    pub async fn list(
        &self,
        caller: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<EventView>, ApiError> {
        let entities = self
            .events
            .list_visible(caller, listing_cutoff(now), limit)
            .await?;
        self.assemble(caller, entities).await
    }

    /// The earliest visible event that has not started yet.
    pub async fn next(&self, caller: Uuid, now: DateTime<Utc>) -> Result<Option<EventView>, ApiError> {
        let Some(entity) = self.events.next_visible(caller, now).await? else {
            return Ok(None);
        };
        Ok(self.assemble(caller, vec![entity]).await?.pop())
    }

    /// A single event with its shouts. Invisible events are reported as missing.
    pub async fn get(&self, caller: Uuid, event_id: Uuid) -> Result<EventView, ApiError> {
        let mut view = self.find_visible(caller, event_id).await?;
        let shouts = self.events.shouts_for(event_id).await?;
        view.shouts = Some(shouts.into_iter().map(ShoutView::from).collect());
        Ok(view)
    }

    /// Records the caller's response on an event they were added to.
    pub async fn respond(
        &self,
        caller: Uuid,
        event_id: Uuid,
        requested: RespondStatus,
    ) -> Result<EventParticipant, ApiError> {
        let existing: Option<EventParticipant> = self
            .events
            .find_participant(event_id, caller)
            .await?
            .map(Into::into);

        let updated = respond(existing.as_ref(), requested)?;
        let stored: EventParticipant = self
            .events
            .update_participant_status(updated.id, updated.status)
            .await?
            .into();

        record_participant_response(stored.status.as_str());
        info!(
            event_id = %event_id,
            user_id = %caller,
            status = %stored.status,
            "Participant responded"
        );

        Ok(stored)
    }

    /// Posts a shout on an event the caller can see.
    pub async fn shout(
        &self,
        caller: Uuid,
        event_id: Uuid,
        message: &str,
    ) -> Result<ShoutView, ApiError> {
        self.find_visible(caller, event_id).await?;

        let shout = self
            .events
            .create_shout(event_id, caller, message.trim())
            .await?;

        info!(event_id = %event_id, user_id = %caller, "Shout posted");
        Ok(shout.into())
    }

    async fn find_visible(&self, caller: Uuid, event_id: Uuid) -> Result<EventView, ApiError> {
        let entity = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(EVENT_NOT_FOUND.to_string()))?;

        self.assemble(caller, vec![entity])
            .await?
            .pop()
            .ok_or_else(|| ApiError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    /// Attaches hosts, co-hosts and participants, then drops anything the
    /// caller may not see. Input order is preserved.
    async fn assemble(
        &self,
        caller: Uuid,
        entities: Vec<EventEntity>,
    ) -> Result<Vec<EventView>, ApiError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let mut host_ids: Vec<Uuid> = entities.iter().map(|e| e.host_id).collect();
        host_ids.sort_unstable();
        host_ids.dedup();

        let hosts: HashMap<Uuid, UserPublic> = self
            .users
            .find_public_by_ids(&host_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, UserPublic::from(u)))
            .collect();

        let mut cohosts: HashMap<Uuid, Vec<UserPublic>> = HashMap::new();
        for row in self.events.cohosts_for(&event_ids).await? {
            cohosts.entry(row.event_id).or_default().push(row.into());
        }

        let mut participants: HashMap<Uuid, Vec<ParticipantView>> = HashMap::new();
        for row in self.events.participants_for(&event_ids).await? {
            participants.entry(row.event_id).or_default().push(row.into());
        }

        let views = entities
            .into_iter()
            .filter_map(|entity| {
                let event: Event = entity.into();
                let host = hosts.get(&event.host_id).cloned()?;
                Some(EventView {
                    host,
                    cohosts: cohosts.remove(&event.id).unwrap_or_default(),
                    participants: participants.remove(&event.id).unwrap_or_default(),
                    shouts: None,
                    event,
                })
            })
            .filter(|view| view.access().can_view(caller))
            .collect();

        Ok(views)
    }
}
