use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Target {
    pub id: i64,
    /// `daily`, `weekly` or `monthly` from the stock client. Stored as free
    /// text, so older files may hold other spellings; those read back as-is.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub completed: bool,
    /// Caller-supplied period identifier (`2024-01-31`, `2024-W05`, `2024-01`);
    /// stored and matched verbatim.
    pub period_key: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTargetRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(alias = "periodKey")]
    pub period_key: String,
}
