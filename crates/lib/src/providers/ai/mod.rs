pub mod gemini;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a generative AI provider.
///
/// This is the single seam between the core and the external LLM APIs; the
/// pseudo-embedding path and any prompt consumer go through it. The entire
/// provider is optional at the application level: search degrades to
/// keyword ranking when none is configured.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
