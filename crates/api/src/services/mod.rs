//! Services that coordinate repositories and domain rules.

pub mod auth;
pub mod events;

pub use auth::{AuthError, AuthService, AuthSession};
pub use events::EventService;
