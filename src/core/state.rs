//! Shared pipeline state types.
//!
//! These types define the stable contracts between pipeline stages. They must
//! not depend on external state or I/O and must remain deterministic across
//! runs.

use serde::{Deserialize, Serialize};

/// Critic's closed two-value decision.
///
/// Anything the critic returns that is not recognizably `safe` normalizes to
/// `Unsafe` at the parse boundary; raw strings never travel past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Safe,
    Unsafe,
}

/// Critic's output: a decision plus the reason behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub reason: String,
}

impl Verdict {
    pub fn unsafe_with(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Unsafe,
            reason: reason.into(),
        }
    }
}

/// Result of attempting to run an approved command.
///
/// Pre-execution validation failures (wrong leading binary, unparseable
/// quoting) are represented as a failed outcome, not as errors, so they flow
/// into the summarizer's short-circuit path like any other failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutcome {
    pub succeeded: bool,
    pub output: String,
}

impl ExecOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
        }
    }
}

/// The single record threaded through one pipeline run.
///
/// Fields are populated monotonically in stage order and never cleared or
/// overwritten. `final_summary` is set exactly once, by either the summarizer
/// or the report path; its presence marks the run terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    pub user_prompt: String,
    pub generated_command: Option<String>,
    pub critique: Option<Verdict>,
    pub execution_result: Option<ExecOutcome>,
    pub final_summary: Option<String>,
}

impl PipelineState {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            generated_command: None,
            critique: None,
            execution_result: None,
            final_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_only_prompt() {
        let state = PipelineState::new("list pods");
        assert_eq!(state.user_prompt, "list pods");
        assert!(state.generated_command.is_none());
        assert!(state.critique.is_none());
        assert!(state.execution_result.is_none());
        assert!(state.final_summary.is_none());
    }

    #[test]
    fn decision_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Decision::Safe).expect("serialize"),
            "\"safe\""
        );
        assert_eq!(
            serde_json::to_string(&Decision::Unsafe).expect("serialize"),
            "\"unsafe\""
        );
    }
}
