use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use crate::dto::{AnalysisResponse, GenerateImageRequest, ImageResponse};
use crate::error::AppResult;
use crate::services::ai::EntrySnapshot;
use crate::AppState;

/// Generates an illustration for the day and stores it on the entry.
///
/// Provider failures are logged and answered with `image_data: null`; the
/// entry is left untouched in that case. The body is optional; a bare POST
/// draws everything from the stored entry and the day's completed tasks.
pub async fn generate_entry_image(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    body: Option<Json<GenerateImageRequest>>,
) -> AppResult<Json<ImageResponse>> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let entry = state.store.get_entry(date).await?;

    let summary = body
        .summary
        .or_else(|| entry.as_ref().and_then(|e| e.journal_text.clone()))
        .unwrap_or_default();
    let mood = body
        .mood
        .or_else(|| entry.as_ref().and_then(|e| e.mood.clone()));
    let completed_tasks = match body.completed_tasks {
        Some(titles) => titles,
        None => state.store.completed_task_titles(date).await?,
    };

    let image = match state
        .ai
        .generate_image(&summary, mood.as_deref(), &completed_tasks)
        .await
    {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(error = %e, %date, "Image generation failed");
            None
        }
    };

    match image {
        Some(image) => {
            state.store.save_entry_image(date, &image).await?;
            tracing::info!(%date, bytes = image.len(), "Entry image stored");
            Ok(Json(ImageResponse {
                image_data: Some(image),
            }))
        }
        None => Ok(Json(ImageResponse { image_data: None })),
    }
}

/// Asks the text model for patterns across the whole journal history.
pub async fn analyze_patterns(State(state): State<AppState>) -> AppResult<Json<AnalysisResponse>> {
    let entries = state.store.list_entries().await?;
    if entries.is_empty() {
        return Ok(Json(AnalysisResponse { analysis: None }));
    }

    // Stored newest first; the prompt reads better chronologically.
    let history: Vec<EntrySnapshot<'_>> = entries.iter().rev().map(EntrySnapshot::from).collect();

    let analysis = match state.ai.analyze_patterns(&history).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(error = %e, entries = history.len(), "Pattern analysis failed");
            None
        }
    };

    Ok(Json(AnalysisResponse { analysis }))
}
