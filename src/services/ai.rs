use std::time::Duration;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::models::entry::{Entry, Reflection};

/// Narrative read of the journal history returned by the text model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub summary: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// What the analysis prompt sees of one entry.
#[derive(Debug, Serialize)]
pub struct EntrySnapshot<'a> {
    pub date: NaiveDate,
    pub mood: Option<&'a str>,
    pub journal_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<&'a Reflection>,
}

impl<'a> From<&'a Entry> for EntrySnapshot<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            date: entry.date,
            mood: entry.mood.as_deref(),
            journal_text: entry.journal_text.as_deref(),
            reflection: (!entry.reflection.is_empty()).then_some(&entry.reflection),
        }
    }
}

/// Client for the generative-AI provider (Gemini `generateContent` API).
///
/// One attempt per call; no retry. Without an API key every call returns
/// `Ok(None)` without touching the network.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl AiClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.ai_api_key.clone(),
            api_base: config.ai_api_base.trim_end_matches('/').to_string(),
            text_model: config.ai_text_model.clone(),
            image_model: config.ai_image_model.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Returns the base64 image payload, or `None` if the model answered
    /// without one.
    pub async fn generate_image(
        &self,
        summary: &str,
        mood: Option<&str>,
        completed_tasks: &[String],
    ) -> anyhow::Result<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let prompt = image_prompt(summary, mood, completed_tasks);
        let reply = self
            .generate_content(
                &self.image_model,
                json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
                }),
            )
            .await?;

        Ok(extract_inline_image(&reply))
    }

    pub async fn analyze_patterns(
        &self,
        history: &[EntrySnapshot<'_>],
    ) -> anyhow::Result<Option<PatternAnalysis>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let prompt = format!(
            r#"You are a gentle journaling companion. Read these journal entries (oldest first) and describe recurring patterns between mood, worries and what the writer found lovely.

Entries:
{}

Respond with JSON using this exact schema:
{{
  "summary": "3-5 sentence narrative addressed to the writer",
  "questions": ["open-ended question 1", "open-ended question 2", "open-ended question 3"]
}}"#,
            serde_json::to_string_pretty(history)?
        );

        let reply = self
            .generate_content(
                &self.text_model,
                json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": { "responseMimeType": "application/json" }
                }),
            )
            .await?;

        let text = extract_text(&reply).ok_or_else(|| anyhow!("AI reply contained no text"))?;
        Ok(Some(parse_analysis(&text)?))
    }

    async fn generate_content(&self, model: &str, body: Value) -> anyhow::Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("AI provider error {}: {}", status, body);
        }

        Ok(response.json().await?)
    }
}

fn image_prompt(summary: &str, mood: Option<&str>, completed_tasks: &[String]) -> String {
    let mut prompt = format!(
        "Paint a soft, illustrative picture capturing this day. No text or lettering in the image.\n\nHow the day went: {}",
        if summary.trim().is_empty() { "a quiet day" } else { summary.trim() }
    );
    if let Some(mood) = mood.filter(|m| !m.trim().is_empty()) {
        prompt.push_str(&format!("\nOverall mood: {mood}"));
    }
    if !completed_tasks.is_empty() {
        prompt.push_str(&format!("\nThings accomplished: {}", completed_tasks.join(", ")));
    }
    prompt
}

fn parts(reply: &Value) -> impl Iterator<Item = &Value> {
    reply["candidates"][0]["content"]["parts"]
        .as_array()
        .into_iter()
        .flatten()
}

fn extract_inline_image(reply: &Value) -> Option<String> {
    parts(reply)
        .find_map(|p| p["inlineData"]["data"].as_str())
        .map(str::to_owned)
}

fn extract_text(reply: &Value) -> Option<String> {
    let text: String = parts(reply).filter_map(|p| p["text"].as_str()).collect();
    (!text.trim().is_empty()).then_some(text)
}

/// Parses the model's JSON answer, tolerating a Markdown code fence around it.
fn parse_analysis(text: &str) -> anyhow::Result<PatternAnalysis> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}
