use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{auth, calendar, events, friends, health, me, status, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

impl AppState {
    /// Builds the shared state. Fails when the configured signing keys are unusable.
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let jwt = config.jwt.build()?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
        })
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development default: any origin.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Authentication happens per handler through the `UserAuth` extractor.
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/me", get(me::get_me))
        .route("/profile", put(me::update_profile))
        .route("/users/search", get(users::search_users))
        .route("/friends", get(friends::list_friends))
        .route("/friends/requests", get(friends::list_requests))
        .route("/friends/request", post(friends::send_request))
        .route("/friends/accept", post(friends::accept_request))
        .route("/friends/deny", post(friends::deny_request))
        .route(
            "/status/availability",
            get(status::get_availability).put(status::update_availability),
        )
        .route("/status/summary", put(status::set_summary))
        .route("/calendar/friends", get(calendar::friends_calendar))
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/events/next", get(events::next_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/respond", post(events::respond_to_event))
        .route("/events/:id/shout", post(events::shout))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(metrics_handler))
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
