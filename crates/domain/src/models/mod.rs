//! Domain models for Up For Something.

pub mod availability;
pub mod event;
pub mod friendship;
pub mod status;
pub mod user;

pub use availability::{AvailabilityDay, DayEntry};
pub use event::{Event, EventParticipant, ParticipantRole, ParticipantStatus};
pub use friendship::{Friendship, FriendshipStatus};
pub use status::{StatusMode, UserStatus};
pub use user::{User, UserPublic};
