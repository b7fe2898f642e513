//! # Task Prompts
//!
//! The enumerated task kinds, their fixed procedural prompt texts, and the
//! ordered trigger-keyword table used to infer a task from a raw message.
//! Unlike roles, a message may match no task at all; the task layer is
//! simply omitted in that case.

use serde::{Deserialize, Serialize};

/// A procedural task layered after the role prompt when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    CodeReview,
    Debugging,
    Architecture,
    Security,
    Performance,
    Testing,
    Deployment,
    Refactoring,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::CodeReview => "code_review",
            Task::Debugging => "debugging",
            Task::Architecture => "architecture",
            Task::Security => "security",
            Task::Performance => "performance",
            Task::Testing => "testing",
            Task::Deployment => "deployment",
            Task::Refactoring => "refactoring",
        }
    }

    /// Resolves an explicit task name, case-insensitively. Anything outside
    /// the enumerated set resolves to `None` and the task section is
    /// omitted; an unknown task never fails prompt composition.
    pub fn resolve(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "code_review" | "codereview" => Some(Task::CodeReview),
            "debugging" => Some(Task::Debugging),
            "architecture" => Some(Task::Architecture),
            "security" => Some(Task::Security),
            "performance" => Some(Task::Performance),
            "testing" => Some(Task::Testing),
            "deployment" => Some(Task::Deployment),
            "refactoring" => Some(Task::Refactoring),
            _ => None,
        }
    }

    /// The fixed procedural description for this task.
    pub fn prompt(&self) -> &'static str {
        match self {
            Task::CodeReview => CODE_REVIEW_PROMPT,
            Task::Debugging => DEBUGGING_PROMPT,
            Task::Architecture => ARCHITECTURE_PROMPT,
            Task::Security => SECURITY_REVIEW_PROMPT,
            Task::Performance => PERFORMANCE_PROMPT,
            Task::Testing => TESTING_PROMPT,
            Task::Deployment => DEPLOYMENT_PROMPT,
            Task::Refactoring => REFACTORING_PROMPT,
        }
    }
}

/// Ordered trigger-keyword table for task inference. Same first-match-wins
/// contract as the role table.
pub(crate) const TASK_KEYWORDS: &[(Task, &[&str])] = &[
    (Task::CodeReview, &["review", "look over", "feedback on"]),
    (
        Task::Debugging,
        &["debug", "error", "not working", "broken", "crash"],
    ),
    (
        Task::Architecture,
        &["architecture", "design pattern", "high-level design"],
    ),
    (Task::Security, &["security", "vulnerability", "secure"]),
    (
        Task::Performance,
        &["performance", "slow", "optimize", "latency"],
    ),
    (Task::Testing, &["test", "coverage", "assertion"]),
    (Task::Deployment, &["deploy", "release", "production", "ship"]),
    (
        Task::Refactoring,
        &["refactor", "clean up", "simplify", "restructure"],
    ),
];

const CODE_REVIEW_PROMPT: &str = r#"Perform a code review. Read the code as written, not as intended. Flag correctness issues first, then API and naming concerns, then style. For every finding, quote the line and propose a concrete change."#;

const DEBUGGING_PROMPT: &str = r#"Work through a debugging session. Restate the symptom, list the plausible causes in order of likelihood, and give the single cheapest check that discriminates between them. Only propose a fix once a cause is confirmed or strongly indicated."#;

const ARCHITECTURE_PROMPT: &str = r#"Produce an architecture recommendation. Describe the components, their responsibilities, and the data that flows between them. State the load and consistency assumptions the design depends on."#;

const SECURITY_REVIEW_PROMPT: &str = r#"Perform a security assessment. Enumerate trust boundaries and the data crossing each one. Report findings with the affected surface, an attack sketch, and a remediation, ordered by severity."#;

const PERFORMANCE_PROMPT: &str = r#"Work on a performance problem. Establish the baseline measurement first, identify the dominant cost, and change one thing at a time. Reject optimizations that lack a measurement to justify them."#;

const TESTING_PROMPT: &str = r#"Design or improve tests. Cover the contract, not the implementation: normal cases, boundary values, and the documented failure modes. Name each test after the behavior it pins down."#;

const DEPLOYMENT_PROMPT: &str = r#"Plan a deployment. Specify the rollout order, the health checks that gate each step, and the rollback procedure. Treat configuration changes with the same rigor as code changes."#;

const REFACTORING_PROMPT: &str = r#"Plan a refactoring. Preserve observable behavior; list the invariants the change must keep and the tests that verify them. Prefer a sequence of small, independently safe steps over one large rewrite."#;
