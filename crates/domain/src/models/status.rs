//! Summary status ("what am I up for") domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum length of a SPECIFIC status text, in characters.
pub const MAX_STATUS_TEXT_LENGTH: usize = 64;

/// How a user currently describes their willingness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusMode {
    Off,
    General,
    Specific,
}

impl StatusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMode::Off => "OFF",
            StatusMode::General => "GENERAL",
            StatusMode::Specific => "SPECIFIC",
        }
    }
}

impl FromStr for StatusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(StatusMode::Off),
            "GENERAL" => Ok(StatusMode::General),
            "SPECIFIC" => Ok(StatusMode::Specific),
            _ => Err(format!("Invalid status mode: {}", s)),
        }
    }
}

impl fmt::Display for StatusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stored singleton status record of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub user_id: Uuid,
    pub mode: StatusMode,
    pub text: Option<String>,
    pub revision: i64,
    pub updated_at: DateTime<Utc>,
}

/// Status as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub mode: StatusMode,
    pub text: Option<String>,
    pub revision: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<UserStatus> for StatusView {
    fn from(status: UserStatus) -> Self {
        Self {
            mode: status.mode,
            text: status.text,
            revision: status.revision,
            updated_at: status.updated_at,
        }
    }
}

/// Request payload for `PUT /status/summary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummaryRequest {
    pub mode: StatusMode,
    #[serde(default)]
    pub text: Option<String>,
    /// When present, the write only succeeds if the stored revision matches.
    #[serde(default)]
    pub expected_revision: Option<i64>,
}

/// Response for `PUT /status/summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SetSummaryResponse {
    pub status: StatusView,
}
