use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::models::{CreateGoal, Goal};
use crate::web::errors::ApiResult;
use crate::web::extractors::Caller;
use crate::web::state::AppState;

/// POST /v1/iaps/:uuid/goals
pub async fn create_goal(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(iap_uuid): Path<Uuid>,
    Json(request): Json<CreateGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.service.create_goal(iap_uuid, request, &caller).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// DELETE /v1/goals/:uuid
pub async fn remove_goal(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(goal_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.remove_goal(goal_uuid, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
