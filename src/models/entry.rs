use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Answers to the daily reflection prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub worries: Option<String>,
    pub sadness: Option<String>,
    pub annoyance: Option<String>,
    #[serde(alias = "body_needs")]
    pub body_needs: Option<String>,
    pub loveliness: Option<String>,
}

impl Reflection {
    /// Decodes a stored reflection blob. Anything that is not a JSON object
    /// decodes to the empty record; non-string values and unknown keys are
    /// dropped field by field.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(Value::Object(map)) = raw.and_then(|s| serde_json::from_str::<Value>(s).ok())
        else {
            return Self::default();
        };

        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_owned)
        };

        Self {
            worries: field(&["worries"]),
            sadness: field(&["sadness"]),
            annoyance: field(&["annoyance"]),
            body_needs: field(&["bodyNeeds", "body_needs"]),
            loveliness: field(&["loveliness"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Row as stored in `entries`.
#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub date: NaiveDate,
    pub journal_text: Option<String>,
    pub mood: Option<String>,
    pub sleep_start: Option<String>,
    pub sleep_end: Option<String>,
    pub reflection_json: Option<String>,
    pub image_data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub journal_text: Option<String>,
    pub mood: Option<String>,
    pub sleep_start: Option<String>,
    pub sleep_end: Option<String>,
    pub reflection: Reflection,
    pub image_data: Option<String>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        let reflection = Reflection::decode(row.reflection_json.as_deref());
        Self {
            date: row.date,
            journal_text: row.journal_text,
            mood: row.mood,
            sleep_start: row.sleep_start,
            sleep_end: row.sleep_end,
            reflection,
            image_data: row.image_data,
        }
    }
}

/// POST /api/entries
///
/// Every field except `date` may be omitted. Omitted fields overwrite the
/// stored value with null, except `image_data`, which is only replaced when
/// present.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    pub date: NaiveDate,
    pub journal_text: Option<String>,
    pub mood: Option<String>,
    pub sleep_start: Option<String>,
    pub sleep_end: Option<String>,
    pub reflection: Option<Reflection>,
    /// Older clients send the reflection pre-serialized.
    pub reflection_json: Option<String>,
    pub image_data: Option<String>,
}

impl SaveEntryRequest {
    pub fn into_draft(self) -> EntryDraft {
        let reflection = match self.reflection {
            Some(reflection) => reflection,
            None => Reflection::decode(self.reflection_json.as_deref()),
        };
        EntryDraft {
            date: self.date,
            journal_text: self.journal_text,
            mood: self.mood,
            sleep_start: self.sleep_start,
            sleep_end: self.sleep_end,
            reflection,
            image_data: self.image_data,
        }
    }
}

/// Typed entry ready to be written by the store.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub journal_text: Option<String>,
    pub mood: Option<String>,
    pub sleep_start: Option<String>,
    pub sleep_end: Option<String>,
    pub reflection: Reflection,
    pub image_data: Option<String>,
}
