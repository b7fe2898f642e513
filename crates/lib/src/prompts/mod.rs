//! # Prompt Template Modules
//!
//! This module organizes the prompt templates and the composition logic
//! layered on top of them. Templates are plain constants; all assembly
//! happens in [`manager`].

pub mod base;
pub mod manager;
pub mod roles;
pub mod tasks;

pub use manager::{PromptConfig, PromptManager, PromptRequest};
pub use roles::Role;
pub use tasks::Task;
