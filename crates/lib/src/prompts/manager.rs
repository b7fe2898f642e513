//! # Prompt Composition
//!
//! [`PromptManager`] deterministically assembles a single instruction string
//! for an LLM call by layering a base persona, a role prompt, and an
//! optional task prompt. The manager holds configuration only; every
//! request's state arrives in a [`PromptRequest`] and is discarded after
//! composition, so the output is a pure function of its inputs.
//!
//! Unknown role or task names never fail composition. Prompt generation
//! must never block a chat turn, so unknown values degrade to the default
//! role or to an absent task section. The one fallible entry point is the
//! explicit [`PromptManager::validate_context`], for callers that require
//! strict context.

use super::{
    base::BASE_PERSONA_PROMPT,
    roles::{Role, ROLE_KEYWORDS},
    tasks::{Task, TASK_KEYWORDS},
};
use crate::{
    errors::PromptError,
    types::{ChatMessage, TaskContext, UserProfile},
};
use regex::Regex;
use std::sync::LazyLock;

/// Matches a fenced code block opening with stray spaces between the fence
/// and its language tag, e.g. "``` rust".
static FENCE_OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```[ \t]+(\S+)").expect("fence opening pattern is valid"));

/// Matches runs of three or more newlines.
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline run pattern is valid"));

/// Configuration for a [`PromptManager`]. These are process-level defaults,
/// not per-request state.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// The role used when none is given or the given one is unknown.
    pub default_role: Role,
    /// How many trailing history entries survive truncation.
    pub max_history_length: usize,
    /// When false, timestamps are stripped from the rendered transcript.
    pub include_timestamps: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            default_role: Role::Developer,
            max_history_length: 10,
            include_timestamps: true,
        }
    }
}

/// The inputs for a single prompt composition. Constructed per request,
/// consumed, and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRequest<'a> {
    /// Explicit role name. Unknown names fall back to the default role.
    pub role: Option<&'a str>,
    /// Explicit task name. Unknown names mean no task section.
    pub task: Option<&'a str>,
    pub context: Option<&'a TaskContext>,
    pub user: Option<&'a UserProfile>,
    pub history: &'a [ChatMessage],
    pub custom_instructions: Option<&'a str>,
}

/// Composes instruction strings for the conversational backend.
#[derive(Debug, Clone, Default)]
pub struct PromptManager {
    config: PromptConfig,
}

impl PromptManager {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Assembles the final instruction string: base persona, then the role
    /// prompt, then the task prompt when one resolved. Sections are joined
    /// with blank lines and empty optional sections are omitted entirely.
    pub fn generate_prompt(&self, request: &PromptRequest) -> String {
        let role = request
            .role
            .and_then(Role::resolve)
            .unwrap_or(self.config.default_role);
        let task = request.task.and_then(Task::resolve);

        let mut sections = vec![
            self.base_section(request),
            self.role_section(role, request.context),
        ];
        if let Some(task) = task {
            sections.push(self.task_section(task, request.context));
        }
        sections.join("\n\n")
    }

    /// Convenience entry point: infers role and task from the raw message,
    /// then composes the prompt.
    pub fn get_contextual_prompt(&self, message: &str, context: &TaskContext) -> String {
        let role = self.determine_role(message);
        let task = self.determine_task(message);
        self.generate_prompt(&PromptRequest {
            role: Some(role.as_str()),
            task: task.map(|t| t.as_str()),
            context: Some(context),
            ..Default::default()
        })
    }

    /// Keeps the most recent `max_history_length` entries in their original
    /// order, stripping timestamps when the config says to.
    pub fn process_history(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(self.config.max_history_length);
        history[start..]
            .iter()
            .cloned()
            .map(|mut message| {
                if !self.config.include_timestamps {
                    message.timestamp = None;
                }
                message
            })
            .collect()
    }

    /// Infers a role from the message via the ordered trigger-keyword
    /// table: case-insensitive substring match, first role to match wins,
    /// default role when nothing matches. Deliberately a dumb heuristic.
    pub fn determine_role(&self, message: &str) -> Role {
        let lowered = message.to_lowercase();
        for (role, keywords) in ROLE_KEYWORDS {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return *role;
            }
        }
        self.config.default_role
    }

    /// Infers a task from the message. Same strategy as
    /// [`determine_role`](Self::determine_role), but with no fallback.
    pub fn determine_task(&self, message: &str) -> Option<Task> {
        let lowered = message.to_lowercase();
        for (task, keywords) in TASK_KEYWORDS {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return Some(*task);
            }
        }
        None
    }

    /// Cleans an LLM response before display: trims outer whitespace,
    /// normalizes fenced code block openings ("``` rust" to "```rust"),
    /// and collapses runs of 3+ newlines to exactly 2. Idempotent.
    pub fn format_response(&self, response: &str) -> String {
        let normalized = FENCE_OPENING.replace_all(response, "```$1");
        let collapsed = EXCESS_NEWLINES.replace_all(&normalized, "\n\n");
        collapsed.trim().to_string()
    }

    /// Strict context validation for callers that require a concrete task.
    /// Not invoked by `generate_prompt`; permissive composition is the
    /// default and this is the only error path on the prompt side.
    pub fn validate_context(&self, context: &TaskContext) -> Result<(), PromptError> {
        if context
            .task
            .as_deref()
            .is_none_or(|task| task.trim().is_empty())
        {
            return Err(PromptError::MissingContextField("task"));
        }
        if context.requirements.is_empty() {
            return Err(PromptError::MissingContextField("requirements"));
        }
        Ok(())
    }

    fn base_section(&self, request: &PromptRequest) -> String {
        let mut out = String::from(BASE_PERSONA_PROMPT);

        if let Some(instructions) = request
            .custom_instructions
            .filter(|text| !text.trim().is_empty())
        {
            out.push_str("\n\nAdditional instructions:\n");
            out.push_str(instructions.trim());
        }

        if let Some(user) = request.user {
            if !user.preferences.is_empty() {
                out.push_str("\n\nUser preferences:");
                for (key, value) in &user.preferences {
                    out.push_str(&format!("\n- {key}: {value}"));
                }
            }
        }

        let history = self.process_history(request.history);
        if !history.is_empty() {
            out.push_str("\n\nConversation so far:");
            for message in &history {
                match &message.timestamp {
                    Some(timestamp) => out.push_str(&format!(
                        "\n[{}] {}: {}",
                        timestamp.to_rfc3339(),
                        message.sender,
                        message.content
                    )),
                    None => out.push_str(&format!("\n{}: {}", message.sender, message.content)),
                }
            }
        }

        out
    }

    fn role_section(&self, role: Role, context: Option<&TaskContext>) -> String {
        let mut out = String::from(role.prompt());
        let Some(context) = context else {
            return out;
        };

        if let Some(task) = context.task.as_deref().filter(|t| !t.trim().is_empty()) {
            out.push_str("\n\nTask:\n");
            out.push_str(task.trim());
        }
        push_bullet_section(&mut out, "Requirements", &context.requirements);
        push_bullet_section(&mut out, "Constraints", &context.constraints);
        out
    }

    fn task_section(&self, task: Task, context: Option<&TaskContext>) -> String {
        let mut out = String::from(task.prompt());
        let Some(context) = context else {
            return out;
        };

        if let Some(state) = context
            .current_state
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            out.push_str("\n\nCurrent State:\n");
            out.push_str(state.trim());
        }
        if let Some(outcome) = context
            .desired_outcome
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            out.push_str("\n\nDesired Outcome:\n");
            out.push_str(outcome.trim());
        }
        push_bullet_section(&mut out, "Constraints", &context.constraints);
        push_bullet_section(&mut out, "Technologies", &context.technologies);
        if let Some(focus) = context
            .priority_focus
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            out.push_str("\n\nPriority Focus:\n");
            out.push_str(focus.trim());
        }
        out
    }
}

fn push_bullet_section(out: &mut String, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n\n{header}:"));
    for item in items {
        out.push_str(&format!("\n- {item}"));
    }
}
