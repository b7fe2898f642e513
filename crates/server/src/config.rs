//! # Application Configuration
//!
//! Configuration for the `folio-server`, loaded from an optional
//! `config.yml` merged with environment variables. The AI provider block is
//! optional by design: without one the server still runs, with search in
//! degraded (keyword-and-recency) mode.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The optional generative AI provider. `AI__PROVIDER` etc. in the
    /// environment, or an `ai:` block in `config.yml`.
    #[serde(default)]
    pub ai: Option<AiConfig>,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    "db/folio.db".to_string()
}

/// Configuration for a generative AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// The type of provider ("gemini" or "local").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it can be derived from the
    /// model name; required for local providers.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be absent for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the configuration from `config.yml` (if present) and the
/// environment. Environment variables win; nested fields use a double
/// underscore separator (e.g. `AI__API_KEY`).
pub fn get_config() -> Result<AppConfig, config::ConfigError> {
    let builder = ConfigBuilder::builder()
        .add_source(File::new("config.yml", FileFormat::Yaml).required(false))
        .add_source(Environment::default().separator("__"))
        .build()?;
    builder.try_deserialize()
}
