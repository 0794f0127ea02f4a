use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::NaiveTime;

use crate::dto::{TrendPoint, TrendsResponse};
use crate::error::AppResult;
use crate::AppState;

/// Mood and sleep series for the chart views.
pub async fn get_trends(State(state): State<AppState>) -> AppResult<Json<TrendsResponse>> {
    let entries = state.store.list_entries().await?;

    let mut mood_counts = BTreeMap::new();
    let points = entries
        .into_iter()
        .rev()
        .map(|entry| {
            if let Some(mood) = entry.mood.as_deref().filter(|m| !m.is_empty()) {
                *mood_counts.entry(mood.to_string()).or_insert(0) += 1;
            }
            TrendPoint {
                sleep_hours: sleep_hours(entry.sleep_start.as_deref(), entry.sleep_end.as_deref()),
                date: entry.date,
                mood: entry.mood,
            }
        })
        .collect();

    Ok(Json(TrendsResponse {
        points,
        mood_counts,
    }))
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Hours between going to bed and waking up. A wake time earlier than the
/// bed time is taken to be on the next day.
fn sleep_hours(start: Option<&str>, end: Option<&str>) -> Option<f64> {
    let start = parse_clock(start?)?;
    let end = parse_clock(end?)?;

    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    Some(minutes as f64 / 60.0)
}
