use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness only; never touches the journal file.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "daybook-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the journal file answers a query. The AI provider is reported
/// but never gates readiness: without a key the journal still works, it just
/// answers image and analysis requests with null.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let ai = if state.ai.is_enabled() {
        "configured"
    } else {
        "disabled"
    };

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "journal_db": "ok", "ai_provider": ai },
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Journal database is not answering");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "checks": { "journal_db": "failed", "ai_provider": ai },
                })),
            )
        }
    }
}
