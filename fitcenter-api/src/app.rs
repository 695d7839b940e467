/// Application state and router builder
///
/// # Example
///
/// ```
/// use fitcenter_api::{app::{build_router, AppState}, config::Config};
/// use fitcenter_shared::db::store::MemoryStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = build_router(state);
/// ```

use crate::{config::Config, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use fitcenter_shared::db::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor. The store is
/// injected so tests can swap in an isolated in-memory one.
#[derive(Clone)]
pub struct AppState {
    /// Storage access layer
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /members
/// │   ├── POST   /members               # Create member
/// │   ├── GET    /members               # List members
/// │   ├── GET    /members/:id           # Get member
/// │   ├── PUT    /members/:id           # Replace member
/// │   ├── DELETE /members/:id           # Delete member
/// │   └── GET    /members/:id/workouts  # Member's sessions
/// └── /workouts
///     ├── POST   /workouts              # Record session
///     └── GET    /workouts              # List sessions
/// ```
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/members",
            get(routes::members::list_members).post(routes::members::create_member),
        )
        .route(
            "/members/:id",
            get(routes::members::get_member)
                .put(routes::members::update_member)
                .delete(routes::members::delete_member),
        )
        .route(
            "/members/:id/workouts",
            get(routes::workouts::list_member_workouts),
        )
        .route(
            "/workouts",
            get(routes::workouts::list_workouts).post(routes::workouts::create_workout),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
