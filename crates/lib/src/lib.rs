//! # Folio Core
//!
//! This crate provides the core logic for a portfolio content service:
//! layered prompt composition for a conversational AI backend, and a
//! lightweight cross-collection similarity search over the portfolio's
//! content collections (blogs, projects, services, contact messages).
//!
//! Both halves share one design rule: the AI features are optional
//! enhancers. When the generative provider is missing or failing, prompt
//! composition still produces a usable instruction string and search
//! degrades to keyword-and-recency ranking instead of returning an error.

pub mod embedding;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod search;
pub mod types;

pub use errors::PromptError;
pub use prompts::manager::{PromptConfig, PromptManager, PromptRequest};
pub use types::{
    ChatMessage, ContentType, ResultType, SearchRecord, SearchResult, TaskContext, UserProfile,
};
