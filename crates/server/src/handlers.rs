//! # Route Handlers
//!
//! Axum handlers for the search and prompt-composition endpoints. Every
//! successful response uses the `{success: true, data}` envelope; an empty
//! result set is a success, not an error.

use super::{errors::AppError, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use folio::{
    prompts::{Role, Task},
    search::{execute_search, recent_searches},
    types::{ChatMessage, ContentType, SearchData, SearchRecord, TaskContext, UserProfile},
    PromptRequest,
};
use serde::{Deserialize, Serialize};
use tracing::info;

// --- API Payloads ---

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// One of blog, project, service, message, all. Anything else falls
    /// back to `all`.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct RecentSearchesRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ComposePromptRequest {
    pub message: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub context: Option<TaskContext>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

#[derive(Serialize)]
pub struct ComposePromptResponse {
    pub prompt: String,
    pub role: String,
    pub task: Option<String>,
}

// --- Route Handlers ---

pub async fn root() -> &'static str {
    "folio server is running."
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Handler for `GET /search`: cross-collection search, grouped for the
/// all-types path and flat for a single requested type.
pub async fn search_handler(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchData>>, AppError> {
    let query = params.q.unwrap_or_default();
    let content_type = params
        .content_type
        .as_deref()
        .and_then(ContentType::parse)
        .unwrap_or_default();
    info!(
        query,
        content_type = content_type.as_str(),
        "Received search request"
    );

    let data = execute_search(
        app_state.provider.clone(),
        app_state.ai_provider.as_deref(),
        &query,
        content_type,
        None,
    )
    .await?;

    Ok(ok(data))
}

/// Handler for `POST /search`: the most recent search records, optionally
/// filtered by the identity that issued them.
pub async fn recent_searches_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<RecentSearchesRequest>,
) -> Result<Json<ApiResponse<Vec<SearchRecord>>>, AppError> {
    let records = recent_searches(app_state.provider.as_ref(), payload.user_id.as_deref()).await?;
    Ok(ok(records))
}

/// Handler for `POST /prompt`: composes the contextual system prompt for a
/// message. The LLM call itself belongs to the external chat consumer;
/// this endpoint only prepares its input.
pub async fn compose_prompt_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ComposePromptRequest>,
) -> Result<Json<ApiResponse<ComposePromptResponse>>, AppError> {
    let manager = &app_state.prompt_manager;

    // Explicit role/task win; otherwise infer them from the message.
    let role = payload
        .role
        .as_deref()
        .and_then(Role::resolve)
        .unwrap_or_else(|| manager.determine_role(&payload.message));
    let task = payload
        .task
        .as_deref()
        .and_then(Task::resolve)
        .or_else(|| manager.determine_task(&payload.message));

    let prompt = manager.generate_prompt(&PromptRequest {
        role: Some(role.as_str()),
        task: task.map(|t| t.as_str()),
        context: payload.context.as_ref(),
        user: payload.user.as_ref(),
        history: &payload.history,
        custom_instructions: payload.custom_instructions.as_deref(),
    });

    Ok(ok(ComposePromptResponse {
        prompt,
        role: role.as_str().to_string(),
        task: task.map(|t| t.as_str().to_string()),
    }))
}
