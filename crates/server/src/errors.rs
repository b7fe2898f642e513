use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio::{search::SearchError, PromptError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses with the API's `{success: false, error}` envelope.
pub enum AppError {
    /// Errors originating from the `folio` core.
    Prompt(PromptError),
    /// Errors from the search pipeline (storage-level only; degraded AI
    /// conditions never reach here).
    Search(SearchError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::Search(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Prompt(err) => {
                error!("PromptError: {err:?}");
                match err {
                    PromptError::MissingContextField(field) => (
                        StatusCode::BAD_REQUEST,
                        format!("Missing required context field: {field}"),
                    ),
                    PromptError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    PromptError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    PromptError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    PromptError::StorageConnection(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage provider connection error: {e}"),
                    ),
                    PromptError::StorageOperationFailed(e)
                    | PromptError::StorageQueryFailed(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage operation failed: {e}"),
                    ),
                    PromptError::JsonSerialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    PromptError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::Search(err) => {
                error!("SearchError: {err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
