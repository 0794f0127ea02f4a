use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use crate::dto::{CreatedResponse, SuccessResponse};
use crate::error::AppResult;
use crate::models::completion::SetCompletedRequest;
use crate::models::task::{CreateTaskRequest, Task};
use crate::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.store.tasks_for_date(date).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let id = state.store.create_task(body.date, &body.title).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn set_task_completed(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(body): Json<SetCompletedRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let updated = state.store.set_task_completed(task_id, body.completed).await?;
    if updated == 0 {
        tracing::debug!(task_id, "Completion patch matched no task");
    }
    Ok(Json(SuccessResponse::ok()))
}

// Idempotent: 200 whether or not the row existed.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> AppResult<Json<SuccessResponse>> {
    state.store.delete_task(task_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
