//! Event, participant and shout domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::user::UserPublic;
use crate::services::visibility::EventAccess;

pub const MIN_ACTIVITY_LENGTH: usize = 2;
pub const MAX_ACTIVITY_LENGTH: usize = 64;
pub const MAX_SHOUT_LENGTH: usize = 500;

/// A planned (or potential) get-together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub host_id: Uuid,
    pub activity: String,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub is_instant: bool,
    pub is_potential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A participant's role. Fixed when the row is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Host,
    Cohost,
    Guest,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Host => "HOST",
            ParticipantRole::Cohost => "COHOST",
            ParticipantRole::Guest => "GUEST",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOST" => Ok(ParticipantRole::Host),
            "COHOST" => Ok(ParticipantRole::Cohost),
            "GUEST" => Ok(ParticipantRole::Guest),
            _ => Err(format!("Invalid participant role: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a participant stands on an event.
///
/// `Invited` is only ever assigned when a guest row is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Invited,
    Interested,
    Joined,
    Declined,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Invited => "INVITED",
            ParticipantStatus::Interested => "INTERESTED",
            ParticipantStatus::Joined => "JOINED",
            ParticipantStatus::Declined => "DECLINED",
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INVITED" => Ok(ParticipantStatus::Invited),
            "INTERESTED" => Ok(ParticipantStatus::Interested),
            "JOINED" => Ok(ParticipantStatus::Joined),
            "DECLINED" => Ok(ParticipantStatus::Declined),
            _ => Err(format!("Invalid participant status: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The states a participant may respond with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RespondStatus {
    Interested,
    Joined,
    Declined,
}

impl From<RespondStatus> for ParticipantStatus {
    fn from(status: RespondStatus) -> Self {
        match status {
            RespondStatus::Interested => ParticipantStatus::Interested,
            RespondStatus::Joined => ParticipantStatus::Joined,
            RespondStatus::Declined => ParticipantStatus::Declined,
        }
    }
}

/// A user's membership in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A participant row to be inserted at event creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewParticipant {
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
}

/// Everything needed to insert an event in one transaction.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub host_id: Uuid,
    pub activity: String,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub is_instant: bool,
    pub is_potential: bool,
    pub cohost_ids: Vec<Uuid>,
    pub participants: Vec<NewParticipant>,
}

fn validate_activity(activity: &str) -> Result<(), ValidationError> {
    shared::validation::validate_trimmed_length(
        activity,
        MIN_ACTIVITY_LENGTH,
        MAX_ACTIVITY_LENGTH,
        "activity_length",
    )
}

fn validate_shout_message(message: &str) -> Result<(), ValidationError> {
    shared::validation::validate_trimmed_length(message, 1, MAX_SHOUT_LENGTH, "message_length")
}

/// Request payload for `POST /events`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(custom(function = "validate_activity"))]
    pub activity: String,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_instant: bool,

    #[serde(default)]
    pub is_potential: bool,

    #[validate(length(max = 80, message = "Location must be at most 80 characters"))]
    #[serde(default)]
    pub location: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    #[serde(default)]
    pub notes: Option<String>,

    #[validate(length(max = 512, message = "Image URL must be at most 512 characters"))]
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub invitee_ids: Vec<Uuid>,

    #[serde(default)]
    pub cohost_ids: Vec<Uuid>,
}

/// Request payload for `POST /events/:id/respond`.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub status: RespondStatus,
}

/// Request payload for `POST /events/:id/shout`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShoutRequest {
    #[validate(custom(function = "validate_shout_message"))]
    pub message: String,
}

/// A participant with the user's public info attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
    pub user: UserPublic,
}

/// A shout with its author's public info attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoutView {
    pub id: Uuid,
    pub event_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user: UserPublic,
}

/// An event together with the people attached to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub host: UserPublic,
    pub cohosts: Vec<UserPublic>,
    pub participants: Vec<ParticipantView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shouts: Option<Vec<ShoutView>>,
}

impl EventView {
    /// The visibility facts carried by this view.
    pub fn access(&self) -> EventAccess {
        EventAccess {
            host_id: self.event.host_id,
            cohost_ids: self.cohosts.iter().map(|u| u.id).collect(),
            participant_ids: self.participants.iter().map(|p| p.user_id).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub event: EventView,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextEventResponse {
    pub event: Option<EventView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub participant: EventParticipant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoutResponse {
    pub shout: ShoutView,
}
