//! Per-day availability ("up for something") domain models.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Number of days covered by every availability calendar.
pub const AVAILABILITY_WINDOW_DAYS: usize = 28;

/// Maximum length of a day's "up" text, in characters.
pub const MAX_UP_TEXT_LENGTH: usize = 64;

/// Truncates an instant to its UTC day bucket.
pub fn day_bucket(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// UTC midnight of the given day bucket.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// A recorded availability row. Absence of a row means "not up".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDay {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub is_up: bool,
    pub up_text: Option<String>,
}

/// One slot of a dense calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: DateTime<Utc>,
    pub is_up: bool,
    pub up_text: Option<String>,
}

impl DayEntry {
    /// The entry for a day with no recorded row.
    pub fn not_up(date: NaiveDate) -> Self {
        Self {
            date: day_start(date),
            is_up: false,
            up_text: None,
        }
    }

    /// Renders a recorded row. Text is only meaningful while up.
    pub fn from_recorded(date: NaiveDate, is_up: bool, up_text: Option<&str>) -> Self {
        Self {
            date: day_start(date),
            is_up,
            up_text: if is_up { up_text.map(str::to_string) } else { None },
        }
    }
}

fn validate_up_text(text: &str) -> Result<(), ValidationError> {
    shared::validation::validate_trimmed_length(text, 0, MAX_UP_TEXT_LENGTH, "up_text_length")
}

/// A single day in an availability update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDayInput {
    pub date: DateTime<Utc>,
    pub is_up: bool,
    #[validate(custom(function = "validate_up_text"))]
    #[serde(default)]
    pub up_text: Option<String>,
}

/// Request payload for `PUT /status/availability`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    #[validate(length(min = 1, max = 28, message = "days must contain 1-28 entries"), nested)]
    pub days: Vec<AvailabilityDayInput>,
}

impl UpdateAvailabilityRequest {
    /// Normalizes the batch into rows for `user_id`.
    ///
    /// Dates are truncated to their UTC day, text is trimmed and dropped for
    /// days that are not up, and duplicate days keep the last entry. Rows are
    /// returned in ascending date order.
    pub fn into_rows(self, user_id: Uuid) -> Vec<AvailabilityDay> {
        let mut by_day: BTreeMap<NaiveDate, AvailabilityDay> = BTreeMap::new();

        for input in self.days {
            let date = day_bucket(input.date);
            let up_text = if input.is_up {
                shared::validation::normalize_optional_text(input.up_text.as_deref())
            } else {
                None
            };
            by_day.insert(
                date,
                AvailabilityDay {
                    user_id,
                    date,
                    is_up: input.is_up,
                    up_text,
                },
            );
        }

        by_day.into_values().collect()
    }
}

/// Response for `GET /status/availability`.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub start: DateTime<Utc>,
    pub days: Vec<DayEntry>,
}

/// Response for `PUT /status/availability`.
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Query parameters for `GET /calendar/friends`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendCalendarQuery {
    pub ids: Option<String>,
}

impl FriendCalendarQuery {
    /// Parses the comma separated id list.
    ///
    /// Blank and unparseable entries are dropped; an id that is not a UUID
    /// cannot belong to a friend.
    pub fn requested_ids(&self) -> Vec<Uuid> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| Uuid::parse_str(s).ok())
            .collect()
    }
}

/// One friend's dense calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendCalendar {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub days: Vec<DayEntry>,
}

/// Response for `GET /calendar/friends`.
#[derive(Debug, Clone, Serialize)]
pub struct FriendCalendarResponse {
    pub start: DateTime<Utc>,
    pub friends: Vec<FriendCalendar>,
}
