//! # Activity Provider Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{Activity, ActivityProvider, CreateActivityProvider};
use crate::provider_client::ConfigInterface;
use crate::web::errors::ApiResult;
use crate::web::extractors::Caller;
use crate::web::state::AppState;

/// GET /v1/activity_providers
pub async fn list_activity_providers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActivityProvider>>> {
    Ok(Json(state.service.get_activity_providers().await?))
}

/// Register a provider within an IAP: POST /v1/iaps/:uuid/activity_providers
///
/// The provider is contacted before anything is stored.
pub async fn create_activity_provider(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(iap_uuid): Path<Uuid>,
    Json(request): Json<CreateActivityProvider>,
) -> ApiResult<(StatusCode, Json<ActivityProvider>)> {
    info!(
        iap_uuid = %iap_uuid,
        name = %request.name,
        url = %request.url,
        caller = %caller,
        "Creating Activity Provider via web API"
    );
    let provider = state
        .service
        .create_activity_provider(iap_uuid, request, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

/// GET /v1/activity_providers/:uuid
pub async fn get_activity_provider(
    State(state): State<AppState>,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<Json<ActivityProvider>> {
    Ok(Json(state.service.get_activity_provider(ap_uuid).await?))
}

/// DELETE /v1/activity_providers/:uuid
pub async fn remove_activity_provider(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .service
        .remove_activity_provider(ap_uuid, &caller)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/activity_providers/:uuid/activities
pub async fn list_provider_activities(
    State(state): State<AppState>,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<Json<Vec<Activity>>> {
    Ok(Json(
        state.service.get_activity_provider_activities(ap_uuid).await?,
    ))
}

/// GET /v1/activity_providers/:uuid/config_interface
pub async fn get_config_interface(
    State(state): State<AppState>,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<Json<ConfigInterface>> {
    Ok(Json(
        state.service.get_configuration_interface_url(ap_uuid).await?,
    ))
}

/// GET /v1/activity_providers/:uuid/config_parameters
pub async fn get_config_parameters(
    State(state): State<AppState>,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(
        state.service.get_configuration_parameters(ap_uuid).await?,
    ))
}

/// GET /v1/activity_providers/:uuid/required_fields
pub async fn get_required_fields(
    State(state): State<AppState>,
    Path(ap_uuid): Path<Uuid>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(
        state
            .service
            .get_activity_provider_required_fields(ap_uuid)
            .await?,
    ))
}
