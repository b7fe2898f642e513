//! # Role Prompts
//!
//! The enumerated persona roles, their fixed prompt texts, and the ordered
//! trigger-keyword table used to infer a role from a raw user message.

use serde::{Deserialize, Serialize};

/// A persona role layered into the composed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Architect,
    Debugger,
    Devops,
    Security,
    Database,
    Frontend,
    Backend,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Architect => "architect",
            Role::Debugger => "debugger",
            Role::Devops => "devops",
            Role::Security => "security",
            Role::Database => "database",
            Role::Frontend => "frontend",
            Role::Backend => "backend",
        }
    }

    /// Resolves an explicit role name, case-insensitively. Returns `None`
    /// for anything outside the enumerated set; callers fall back to their
    /// configured default rather than failing.
    pub fn resolve(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "developer" => Some(Role::Developer),
            "architect" => Some(Role::Architect),
            "debugger" => Some(Role::Debugger),
            "devops" => Some(Role::Devops),
            "security" => Some(Role::Security),
            "database" => Some(Role::Database),
            "frontend" => Some(Role::Frontend),
            "backend" => Some(Role::Backend),
            _ => None,
        }
    }

    /// The fixed expertise description for this role.
    pub fn prompt(&self) -> &'static str {
        match self {
            Role::Developer => DEVELOPER_PROMPT,
            Role::Architect => ARCHITECT_PROMPT,
            Role::Debugger => DEBUGGER_PROMPT,
            Role::Devops => DEVOPS_PROMPT,
            Role::Security => SECURITY_PROMPT,
            Role::Database => DATABASE_PROMPT,
            Role::Frontend => FRONTEND_PROMPT,
            Role::Backend => BACKEND_PROMPT,
        }
    }
}

/// Ordered trigger-keyword table for role inference. Evaluated in
/// declaration order with case-insensitive substring matching; the first
/// role whose list matches wins. Order is part of the contract.
pub(crate) const ROLE_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Developer, &["code", "implement", "develop", "build"]),
    (
        Role::Architect,
        &["design", "architecture", "structure", "system"],
    ),
    (Role::Debugger, &["debug", "error", "bug", "fix", "crash"]),
    (
        Role::Devops,
        &["deploy", "pipeline", "docker", "ci/cd", "infrastructure"],
    ),
    (
        Role::Security,
        &["secure", "vulnerability", "auth", "encrypt"],
    ),
    (
        Role::Database,
        &["database", "query", "schema", "sql", "migration"],
    ),
    (
        Role::Frontend,
        &["frontend", "ui", "component", "css", "react"],
    ),
    (Role::Backend, &["backend", "api", "endpoint", "server"]),
];

const DEVELOPER_PROMPT: &str = r#"Act as a senior software developer. Write clear, working code with idiomatic style for the language at hand. Explain non-obvious decisions briefly, call out edge cases, and prefer small, composable functions over clever one-liners."#;

const ARCHITECT_PROMPT: &str = r#"Act as a software architect. Reason about system boundaries, data flow, and trade-offs before proposing a design. Name the alternatives you rejected and why. Keep proposals proportional to the stated scale; do not gold-plate."#;

const DEBUGGER_PROMPT: &str = r#"Act as a debugging specialist. Start from the observed symptom, form a hypothesis, and describe how to confirm or refute it before suggesting a fix. Ask for the exact error output and reproduction steps when they are missing."#;

const DEVOPS_PROMPT: &str = r#"Act as a DevOps engineer. Focus on reproducible builds, deployment pipelines, containerization, and observability. Prefer boring, well-understood tooling and call out operational risks of any suggestion."#;

const SECURITY_PROMPT: &str = r#"Act as an application security engineer. Evaluate inputs for injection, authentication and authorization gaps, secret handling, and unsafe defaults. Rank findings by exploitability and blast radius, not by count."#;

const DATABASE_PROMPT: &str = r#"Act as a database specialist. Consider schema design, indexing, query plans, and migration safety. Show the query or schema change explicitly and state its locking and performance implications."#;

const FRONTEND_PROMPT: &str = r#"Act as a frontend engineer. Focus on component structure, state management, accessibility, and rendering performance. Prefer platform features over dependencies when they suffice."#;

const BACKEND_PROMPT: &str = r#"Act as a backend engineer. Focus on API design, data modeling, error propagation, and request lifecycle concerns. Make failure modes explicit: timeouts, retries, and partial results."#;
