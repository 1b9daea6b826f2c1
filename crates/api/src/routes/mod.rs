//! HTTP route handlers.

pub mod auth;
pub mod calendar;
pub mod events;
pub mod friends;
pub mod health;
pub mod me;
pub mod status;
pub mod users;
