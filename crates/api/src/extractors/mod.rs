//! Custom Axum extractors.

pub mod json;
pub mod path;
pub mod user_auth;

pub use json::AppJson;
pub use path::AppPath;
pub use user_auth::UserAuth;
