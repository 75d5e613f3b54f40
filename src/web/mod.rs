//! # Web API Module
//!
//! Axum-based REST API over [`IapService`](crate::services::IapService).
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - Request handlers per resource
//! - [`extractors`] - Caller identity extraction
//! - [`errors`] - `ApiError` and its JSON response body
//! - [`state`] - Shared application state

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Create the main Axum application with all routes and middleware
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.config.request_timeout();

    let mut router = Router::new()
        .merge(routes::health_routes())
        .nest("/v1", routes::api_v1_routes());

    router = router.layer(tower_http::timeout::TimeoutLayer::new(request_timeout));

    if app_state.config.cors_enabled {
        router = router.layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        );
    }

    router
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
