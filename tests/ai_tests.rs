mod common;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use common::{spawn_app_with, TestApp};

/// Stand-in for the generateContent endpoint: answers every call with a fixed
/// reply and records the request bodies it saw.
#[derive(Clone)]
struct FakeProvider {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<Value>>>,
}

async fn generate_content(
    State(provider): State<FakeProvider>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    provider.seen.lock().unwrap().push(body);
    (provider.status, Json(provider.reply.clone()))
}

async fn spawn_provider(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let provider = FakeProvider {
        status,
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/models/:model", post(generate_content))
        .with_state(provider);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

async fn app_against(base: &str) -> TestApp {
    spawn_app_with(&[("AI_API_KEY", "test-key"), ("AI_API_BASE", base)]).await
}

fn prompt_of(request: &Value) -> String {
    request["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

fn image_reply(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [
                { "text": "A calm morning" },
                { "inlineData": { "mimeType": "image/png", "data": data } }
            ]}
        }]
    })
}

fn text_reply(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn generated_image_is_stored_and_other_fields_kept() {
    let (base, seen) = spawn_provider(StatusCode::OK, image_reply("cGl4ZWxz")).await;
    let app = app_against(&base).await;

    app.post(
        "/api/entries",
        json!({ "date": "2024-09-09", "journal_text": "Beach walk", "mood": "Joyful" }),
    )
    .await;
    let (_, created) = app
        .post("/api/tasks", json!({ "date": "2024-09-09", "title": "Swim" }))
        .await;
    app.patch(
        &format!("/api/tasks/{}", created["id"]),
        json!({ "completed": true }),
    )
    .await;
    app.post("/api/tasks", json!({ "date": "2024-09-09", "title": "Taxes" }))
        .await;

    let (status, body) = app.post("/api/entries/2024-09-09/image", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image_data"], "cGl4ZWxz");

    let (_, entry) = app.get("/api/entries/2024-09-09").await;
    assert_eq!(entry["image_data"], "cGl4ZWxz");
    assert_eq!(entry["journal_text"], "Beach walk");
    assert_eq!(entry["mood"], "Joyful");

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let prompt = prompt_of(&requests[0]);
    assert!(prompt.contains("Beach walk"));
    assert!(prompt.contains("Joyful"));
    assert!(prompt.contains("Swim"));
    assert!(!prompt.contains("Taxes"));
}

#[tokio::test]
async fn image_for_a_day_without_entry_creates_a_bare_entry() {
    let (base, _) = spawn_provider(StatusCode::OK, image_reply("aW1n")).await;
    let app = app_against(&base).await;

    let (_, body) = app
        .post(
            "/api/entries/2024-09-10/image",
            json!({ "summary": "Rainy", "mood": "Tired", "completed_tasks": ["Nap"] }),
        )
        .await;
    assert_eq!(body["image_data"], "aW1n");

    let (_, entry) = app.get("/api/entries/2024-09-10").await;
    assert_eq!(entry["image_data"], "aW1n");
    assert!(entry["journal_text"].is_null());
}

#[tokio::test]
async fn image_request_without_a_body_uses_the_stored_entry() {
    let (base, seen) = spawn_provider(StatusCode::OK, image_reply("YmFyZQ==")).await;
    let app = app_against(&base).await;

    app.post(
        "/api/entries",
        json!({ "date": "2024-09-13", "journal_text": "Harbour lights", "mood": "Calm" }),
    )
    .await;

    let (status, body) = app
        .request("POST", "/api/entries/2024-09-13/image", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image_data"], "YmFyZQ==");

    let (_, entry) = app.get("/api/entries/2024-09-13").await;
    assert_eq!(entry["image_data"], "YmFyZQ==");
    assert_eq!(entry["journal_text"], "Harbour lights");

    let prompt = prompt_of(&seen.lock().unwrap()[0]);
    assert!(prompt.contains("Harbour lights"));
    assert!(prompt.contains("Calm"));
}

#[tokio::test]
async fn provider_failure_yields_no_image_and_no_write() {
    let (base, seen) = spawn_provider(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "overloaded" }),
    )
    .await;
    let app = app_against(&base).await;

    app.post(
        "/api/entries",
        json!({ "date": "2024-09-11", "journal_text": "kept", "image_data": "b2xk" }),
    )
    .await;

    let (status, body) = app.post("/api/entries/2024-09-11/image", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["image_data"].is_null());

    let (_, entry) = app.get("/api/entries/2024-09-11").await;
    assert_eq!(entry["image_data"], "b2xk");

    let (_, body) = app.post("/api/entries/2024-09-12/image", json!({})).await;
    assert!(body["image_data"].is_null());
    let (_, entry) = app.get("/api/entries/2024-09-12").await;
    assert!(entry.is_null());

    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn analysis_is_parsed_from_the_model_reply() {
    let reply = text_reply(
        r#"{"summary":"Sleep tracks mood.","questions":["What helps you rest?","Who made you laugh?"]}"#,
    );
    let (base, seen) = spawn_provider(StatusCode::OK, reply).await;
    let app = app_against(&base).await;

    app.post(
        "/api/entries",
        json!({ "date": "2024-10-02", "mood": "Calm", "journal_text": "second day" }),
    )
    .await;
    app.post(
        "/api/entries",
        json!({
            "date": "2024-10-01",
            "mood": "Anxious",
            "journal_text": "first day",
            "reflection": { "worries": "deadline" }
        }),
    )
    .await;

    let (status, body) = app.post("/api/analysis", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["summary"], "Sleep tracks mood.");
    assert_eq!(
        body["analysis"]["questions"],
        json!(["What helps you rest?", "Who made you laugh?"])
    );

    let requests = seen.lock().unwrap();
    let prompt = prompt_of(&requests[0]);
    let first = prompt.find("first day").expect("older entry in prompt");
    let second = prompt.find("second day").expect("newer entry in prompt");
    assert!(first < second, "history should be oldest first");
    assert!(prompt.contains("deadline"));
}

#[tokio::test]
async fn unreadable_analysis_collapses_to_null() {
    let (base, _) = spawn_provider(StatusCode::OK, text_reply("I cannot answer that")).await;
    let app = app_against(&base).await;

    app.post("/api/entries", json!({ "date": "2024-10-01", "mood": "Calm" }))
        .await;

    let (status, body) = app.post("/api/analysis", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["analysis"].is_null());
}

#[tokio::test]
async fn empty_history_skips_the_provider() {
    let (base, seen) = spawn_provider(StatusCode::OK, text_reply("{}")).await;
    let app = app_against(&base).await;

    let (status, body) = app.post("/api/analysis", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["analysis"].is_null());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn without_api_key_both_features_are_silent() {
    let app = spawn_app_with(&[]).await;

    app.post("/api/entries", json!({ "date": "2024-10-05", "mood": "Calm" }))
        .await;

    let (status, body) = app.post("/api/entries/2024-10-06/image", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["image_data"].is_null());
    let (_, entry) = app.get("/api/entries/2024-10-06").await;
    assert!(entry.is_null());

    let (status, body) = app.post("/api/analysis", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["analysis"].is_null());
}
