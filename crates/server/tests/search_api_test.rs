//! # Server API Tests
//!
//! End-to-end tests against a spawned server with an in-memory database
//! and no AI provider (degraded keyword mode).

use folio::{
    providers::db::sqlite::SqliteProvider, PromptConfig, PromptManager,
};
use folio_server::{config::AppConfig, run, state::AppState};
use serde_json::{json, Value};
use std::sync::Arc;

/// Spawns the server on a random port with a seeded in-memory database and
/// returns its base URL.
async fn spawn_app() -> String {
    let provider = SqliteProvider::new(":memory:")
        .await
        .expect("in-memory db");
    provider.initialize_schema().await.expect("schema");
    provider
        .initialize_with_data(
            "
            INSERT INTO blogs (title, content, tags, created_at) VALUES
                ('React Hooks Deep Dive', 'All about hooks', 'react', '2024-03-01T00:00:00.000Z');
            INSERT INTO projects (name, description, tags, created_at) VALUES
                ('Portfolio Site', 'Built with React', 'react,rust', '2024-02-01T00:00:00.000Z');
            INSERT INTO services (name, description, category, created_at) VALUES
                ('Frontend Consulting', 'React audits', 'consulting', '2024-01-15T00:00:00.000Z');
            ",
        )
        .await
        .expect("seed data");

    let config = AppConfig {
        port: 0,
        db_url: ":memory:".to_string(),
        ai: None,
    };
    let app_state = AppState {
        config: Arc::new(config),
        provider: Arc::new(provider),
        ai_provider: None,
        prompt_manager: Arc::new(PromptManager::new(PromptConfig::default())),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        run(listener, app_state).await.expect("server run");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_health_check_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/health"))
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.expect("body"), "OK");
}

#[tokio::test]
async fn test_all_types_search_returns_grouped_envelope() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/search?q=react&type=all"))
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    let grouped = &body["data"]["grouped"];
    assert_eq!(grouped["blog"].as_array().map(Vec::len), Some(1));
    assert_eq!(grouped["project"].as_array().map(Vec::len), Some(1));
    assert_eq!(grouped["service"].as_array().map(Vec::len), Some(1));
    assert_eq!(grouped["message"].as_array().map(Vec::len), Some(0));
    let items = body["data"]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["score"], json!(1.0));
    assert_eq!(items[0]["model_type"], json!("Blog"));
}

#[tokio::test]
async fn test_single_type_search_with_no_matches_is_empty_success() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/search?q=zzzz&type=blog"))
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_unknown_type_falls_back_to_all() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/search?q=react&type=widgets"))
        .send()
        .await
        .expect("request failed");

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    assert!(
        body["data"].get("grouped").is_some(),
        "unrecognized type must resolve to the grouped all-types view"
    );
}

#[tokio::test]
async fn test_recent_searches_round_trip() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .get(format!("{address}/search?q=react&type=blog"))
        .send()
        .await
        .expect("search request failed");

    let response = client
        .post(format!("{address}/search"))
        .json(&json!({}))
        .send()
        .await
        .expect("recents request failed");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    let records = body["data"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["query"], json!("react"));
    assert_eq!(records[0]["content_type"], json!("blog"));
    let results = records[0]["results"].as_array().expect("results array");
    assert_eq!(results[0]["result_type"], json!("Blog"));
}

#[tokio::test]
async fn test_prompt_endpoint_infers_role_and_task() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/prompt"))
        .json(&json!({"message": "please debug this error"}))
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["role"], json!("debugger"));
    assert_eq!(body["data"]["task"], json!("debugging"));
    assert!(!body["data"]["prompt"]
        .as_str()
        .expect("prompt string")
        .is_empty());
}

#[tokio::test]
async fn test_prompt_endpoint_honors_explicit_role_and_task() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/prompt"))
        .json(&json!({
            "message": "please debug this error",
            "role": "security",
            "task": "code_review"
        }))
        .send()
        .await
        .expect("request failed");

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["data"]["role"], json!("security"));
    assert_eq!(body["data"]["task"], json!("code_review"));
}
