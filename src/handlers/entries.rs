use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use crate::dto::SuccessResponse;
use crate::error::AppResult;
use crate::models::entry::{Entry, SaveEntryRequest};
use crate::AppState;

/// Responds with `null` when nothing has been written for the date.
pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Option<Entry>>> {
    let entry = state.store.get_entry(date).await?;
    Ok(Json(entry))
}

pub async fn list_entries(State(state): State<AppState>) -> AppResult<Json<Vec<Entry>>> {
    let entries = state.store.list_entries().await?;
    Ok(Json(entries))
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(body): Json<SaveEntryRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let draft = body.into_draft();
    state.store.save_entry(&draft).await?;

    tracing::debug!(date = %draft.date, image = draft.image_data.is_some(), "Entry saved");
    Ok(Json(SuccessResponse::ok()))
}
