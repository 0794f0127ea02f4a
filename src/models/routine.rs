use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RoutineTemplateRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutineTemplateTask {
    pub id: i64,
    pub template_id: i64,
    pub title: String,
}

/// A template together with its task titles, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineTemplate {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<RoutineTemplateTask>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyTemplateRequest {
    pub date: NaiveDate,
    #[serde(rename = "templateId", alias = "template_id")]
    pub template_id: i64,
}
