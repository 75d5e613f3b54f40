//! # IAP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreateIap, Iap, MetricDescriptor};
use crate::orchestration::DeploymentReport;
use crate::web::errors::ApiResult;
use crate::web::extractors::Caller;
use crate::web::state::AppState;

/// List IAPs: GET /v1/iaps
pub async fn list_iaps(State(state): State<AppState>) -> ApiResult<Json<Vec<Iap>>> {
    Ok(Json(state.service.get_iaps().await?))
}

/// Create an IAP: POST /v1/iaps
pub async fn create_iap(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<CreateIap>,
) -> ApiResult<(StatusCode, Json<Iap>)> {
    info!(name = %request.name, caller = %caller, "Creating IAP via web API");
    let iap = state.service.create_iap(request, &caller).await?;
    Ok((StatusCode::CREATED, Json(iap)))
}

/// Get one IAP aggregate: GET /v1/iaps/:uuid
pub async fn get_iap(
    State(state): State<AppState>,
    Path(iap_uuid): Path<Uuid>,
) -> ApiResult<Json<Iap>> {
    Ok(Json(state.service.get_iap(iap_uuid).await?))
}

/// Remove an IAP with its goals and activities: DELETE /v1/iaps/:uuid
pub async fn remove_iap(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(iap_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.remove_iap(iap_uuid, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deploy an IAP: POST /v1/iaps/:uuid/deploy
pub async fn deploy_iap(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(iap_uuid): Path<Uuid>,
) -> ApiResult<Json<DeploymentReport>> {
    info!(iap_uuid = %iap_uuid, caller = %caller, "Deploying IAP via web API");
    Ok(Json(state.service.deploy_iap(iap_uuid, &caller).await?))
}

/// Deploy every IAP not yet deployed: POST /v1/deployments
pub async fn deploy_pending_iaps(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> ApiResult<Json<Vec<DeploymentReport>>> {
    Ok(Json(state.service.deploy_pending_iaps(&caller).await?))
}

/// Available metrics: GET /v1/iaps/:uuid/metrics
pub async fn get_available_metrics(
    State(state): State<AppState>,
    Path(iap_uuid): Path<Uuid>,
) -> ApiResult<Json<Vec<MetricDescriptor>>> {
    Ok(Json(state.service.get_iap_available_metrics(iap_uuid).await?))
}
