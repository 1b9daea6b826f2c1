//! Repository implementations for database operations.

pub mod availability;
pub mod event;
pub mod friendship;
pub mod user;
pub mod user_status;

pub use availability::AvailabilityRepository;
pub use event::EventRepository;
pub use friendship::FriendshipRepository;
pub use user::{ProfileUpdate, UserRepository};
pub use user_status::UserStatusRepository;
