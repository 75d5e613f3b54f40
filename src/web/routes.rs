//! # Web API Route Definitions

use axum::routing::{delete, get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Create API v1 routes, nested under `/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // IAPs
        .route("/iaps", get(handlers::iaps::list_iaps).post(handlers::iaps::create_iap))
        .route(
            "/iaps/:uuid",
            get(handlers::iaps::get_iap).delete(handlers::iaps::remove_iap),
        )
        .route("/iaps/:uuid/deploy", post(handlers::iaps::deploy_iap))
        .route("/iaps/:uuid/metrics", get(handlers::iaps::get_available_metrics))
        .route(
            "/iaps/:uuid/activity_providers",
            post(handlers::activity_providers::create_activity_provider),
        )
        .route(
            "/iaps/:uuid/activities",
            post(handlers::activities::create_activity),
        )
        .route("/iaps/:uuid/goals", post(handlers::goals::create_goal))
        .route("/deployments", post(handlers::iaps::deploy_pending_iaps))
        // Activity Providers
        .route(
            "/activity_providers",
            get(handlers::activity_providers::list_activity_providers),
        )
        .route(
            "/activity_providers/:uuid",
            get(handlers::activity_providers::get_activity_provider)
                .delete(handlers::activity_providers::remove_activity_provider),
        )
        .route(
            "/activity_providers/:uuid/activities",
            get(handlers::activity_providers::list_provider_activities),
        )
        .route(
            "/activity_providers/:uuid/config_interface",
            get(handlers::activity_providers::get_config_interface),
        )
        .route(
            "/activity_providers/:uuid/config_parameters",
            get(handlers::activity_providers::get_config_parameters),
        )
        .route(
            "/activity_providers/:uuid/required_fields",
            get(handlers::activity_providers::get_required_fields),
        )
        // Activities
        .route("/activities", get(handlers::activities::list_activities))
        .route(
            "/activities/:uuid",
            get(handlers::activities::get_activity).delete(handlers::activities::remove_activity),
        )
        // Goals
        .route("/goals/:uuid", delete(handlers::goals::remove_goal))
}

/// Health route (`/health`), outside the versioned API
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::basic_health))
}
