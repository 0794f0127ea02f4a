//! Response envelopes shared across handlers, plus the request/response
//! shapes of the AI-backed and trend endpoints. Entity request types live
//! next to their models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::ai::PatternAnalysis;

// ============================================================================
// Common
// ============================================================================

/// Acknowledgement for writes that do not hand back a row.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Identity assigned by a create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

// ============================================================================
// AI
// ============================================================================

/// POST /api/entries/{date}/image — every field falls back to what is stored
/// for the date.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateImageRequest {
    pub summary: Option<String>,
    pub mood: Option<String>,
    #[serde(alias = "completedTasks")]
    pub completed_tasks: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: Option<PatternAnalysis>,
}

// ============================================================================
// Trends
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood: Option<String>,
    pub sleep_hours: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    /// Oldest first.
    pub points: Vec<TrendPoint>,
    pub mood_counts: BTreeMap<String, i64>,
}
