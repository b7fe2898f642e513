use thiserror::Error;

/// Custom error types for the library.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Storage provider connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Storage query execution failed: {0}")]
    StorageQueryFailed(String),
    #[error("Missing required context field: {0}")]
    MissingContextField(&'static str),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}
