//! # Activity Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{Activity, CreateActivity};
use crate::web::errors::ApiResult;
use crate::web::extractors::Caller;
use crate::web::state::AppState;

/// GET /v1/activities
pub async fn list_activities(State(state): State<AppState>) -> ApiResult<Json<Vec<Activity>>> {
    Ok(Json(state.service.get_activities().await?))
}

/// Create an activity within an IAP: POST /v1/iaps/:uuid/activities
///
/// Parameters are checked against the provider's current contract.
pub async fn create_activity(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(iap_uuid): Path<Uuid>,
    Json(request): Json<CreateActivity>,
) -> ApiResult<(StatusCode, Json<Activity>)> {
    info!(
        iap_uuid = %iap_uuid,
        ap_uuid = %request.activity_provider_uuid,
        name = %request.name,
        caller = %caller,
        "Creating Activity via web API"
    );
    let activity = state
        .service
        .create_activity(iap_uuid, request, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /v1/activities/:uuid
pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_uuid): Path<Uuid>,
) -> ApiResult<Json<Activity>> {
    Ok(Json(state.service.get_activity(activity_uuid).await?))
}

/// DELETE /v1/activities/:uuid
pub async fn remove_activity(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(activity_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.remove_activity(activity_uuid, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
