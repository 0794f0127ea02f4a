use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::{CreatedResponse, SuccessResponse};
use crate::error::AppResult;
use crate::models::completion::SetCompletedRequest;
use crate::models::target::{CreateTargetRequest, Target};
use crate::AppState;

/// All target types for the period; the client splits them by `type`.
pub async fn list_targets(
    State(state): State<AppState>,
    Path(period_key): Path<String>,
) -> AppResult<Json<Vec<Target>>> {
    let targets = state.store.targets_for_period(&period_key).await?;
    Ok(Json(targets))
}

pub async fn create_target(
    State(state): State<AppState>,
    Json(body): Json<CreateTargetRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let id = state
        .store
        .create_target(&body.kind, &body.title, &body.period_key)
        .await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn set_target_completed(
    State(state): State<AppState>,
    Path(target_id): Path<i64>,
    Json(body): Json<SetCompletedRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let updated = state
        .store
        .set_target_completed(target_id, body.completed)
        .await?;
    if updated == 0 {
        tracing::debug!(target_id, "Completion patch matched no target");
    }
    Ok(Json(SuccessResponse::ok()))
}

pub async fn delete_target(
    State(state): State<AppState>,
    Path(target_id): Path<i64>,
) -> AppResult<Json<SuccessResponse>> {
    state.store.delete_target(target_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
