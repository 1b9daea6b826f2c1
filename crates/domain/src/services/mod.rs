//! Core engines for Up For Something.
//!
//! Everything here is pure: callers load the data, the engines decide.

pub mod participation;
pub mod summary;
pub mod timeline;
pub mod visibility;

pub use participation::{plan_participants, resolve_start_time, respond, transition};
pub use summary::{check_revision, resolve_summary, ResolvedSummary};
pub use timeline::{materialize, CalendarWindow};
pub use visibility::{listing_cutoff, visible_friend_ids, EventAccess};
