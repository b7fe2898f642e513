//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it
//! at startup: the storage provider, the optional AI provider client, and
//! the prompt manager, all shared across request handlers.

use crate::config::AppConfig;
use folio::{
    providers::{
        ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
        db::sqlite::SqliteProvider,
    },
    PromptConfig, PromptManager,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// The storage provider for the content collections and search history.
    pub provider: Arc<SqliteProvider>,
    /// The generative provider backing pseudo-embeddings. `None` puts
    /// search in degraded mode; it is never an error.
    pub ai_provider: Option<Arc<dyn AiProvider>>,
    pub prompt_manager: Arc<PromptManager>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider: Option<Arc<dyn AiProvider>> = match &config.ai {
        Some(ai) => match ai.provider.as_str() {
            "gemini" => {
                let api_key = ai
                    .api_key
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("api_key is required for the gemini provider"))?;
                // If api_url is not provided, construct it from the model name.
                let api_url = match (&ai.api_url, &ai.model_name) {
                    (Some(url), _) => url.clone(),
                    (None, Some(model)) => format!(
                        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                    ),
                    (None, None) => {
                        anyhow::bail!("gemini provider needs either api_url or model_name")
                    }
                };
                Some(Arc::new(GeminiProvider::new(api_url, api_key)?))
            }
            "local" => {
                let api_url = ai.api_url.clone().ok_or_else(|| {
                    anyhow::anyhow!("api_url is required for the local provider")
                })?;
                Some(Arc::new(LocalAiProvider::new(
                    api_url,
                    ai.api_key.clone(),
                    ai.model_name.clone(),
                )?))
            }
            other => {
                anyhow::bail!("Unsupported AI provider type '{other}'");
            }
        },
        None => {
            info!("No AI provider configured; search runs in degraded keyword mode.");
            None
        }
    };

    let provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    provider.initialize_schema().await?;

    Ok(AppState {
        config: Arc::new(config),
        provider: Arc::new(provider),
        ai_provider,
        prompt_manager: Arc::new(PromptManager::new(PromptConfig::default())),
    })
}
