use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::{CreatedResponse, SuccessResponse};
use crate::error::AppResult;
use crate::models::routine::{ApplyTemplateRequest, CreateTemplateRequest, RoutineTemplate};
use crate::AppState;

pub async fn list_templates(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoutineTemplate>>> {
    let templates = state.store.list_templates().await?;
    Ok(Json(templates))
}

pub async fn create_template(
    State(state): State<AppState>,
    Json(body): Json<CreateTemplateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let id = state.store.create_template(&body.name, &body.tasks).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> AppResult<Json<SuccessResponse>> {
    state.store.delete_template(template_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Copies the template's tasks onto the date. No dedup against tasks already
/// on that date: applying twice gives two copies.
pub async fn apply_template(
    State(state): State<AppState>,
    Json(body): Json<ApplyTemplateRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let created = state
        .store
        .apply_template(body.template_id, body.date)
        .await?;

    tracing::info!(
        template_id = body.template_id,
        date = %body.date,
        created,
        "Routine template applied"
    );
    Ok(Json(SuccessResponse::ok()))
}
