//! Orchestration of one pipeline run.
//!
//! A straight-line state machine over a single [`PipelineState`]:
//! generate, critique, then exactly one of execute-and-summarize or
//! report-and-halt, decided once at the critic/router boundary. No retries
//! and no loops back to earlier stages.

use anyhow::Result;
use tracing::{info, instrument};

use crate::core::router::{Route, route};
use crate::core::state::PipelineState;
use crate::io::config::{AgentConfig, CommandConfig};
use crate::io::oracle::Oracle;
use crate::io::policy::PolicyStore;
use crate::io::prompt::PromptEngine;
use crate::stages::{critic, executor, generator, summarizer};

/// Reason substituted when the critic refused without saying why.
pub const NO_REASON: &str = "no reason provided";

/// Fallback when the oracle digest comes back blank.
const EMPTY_SUMMARY: &str = "(no summary produced)";

/// The policy-gated pipeline, constructed per process with explicit handles.
///
/// Holds no per-request state: each [`run`](Pipeline::run) creates a fresh
/// [`PipelineState`] and discards it after the caller reads the summary.
/// Runs are strictly sequential; nothing here is safe for concurrent use.
pub struct Pipeline<O: Oracle> {
    oracle: O,
    policy: PolicyStore,
    prompts: PromptEngine,
    command_cfg: CommandConfig,
}

impl<O: Oracle> Pipeline<O> {
    pub fn new(oracle: O, policy: PolicyStore, config: &AgentConfig) -> Self {
        Self {
            oracle,
            policy,
            prompts: PromptEngine::new(&config.command.binary),
            command_cfg: config.command.clone(),
        }
    }

    /// Drive one request through every stage.
    ///
    /// Errors only on oracle transport failures; policy problems, malformed
    /// verdicts, and execution failures all surface through the state record
    /// and its final summary.
    #[instrument(skip_all)]
    pub fn run(&self, user_prompt: &str) -> Result<PipelineState> {
        let mut state = PipelineState::new(user_prompt);

        info!("generating command");
        let command = generator::generate(&self.oracle, &self.prompts, &state.user_prompt)?;
        state.generated_command = Some(command.clone());

        info!("critiquing command");
        let verdict = critic::critique(&self.oracle, &self.prompts, &self.policy, &command)?;
        let decision = route(&verdict);
        state.critique = Some(verdict);

        match decision {
            Route::Execute => {
                info!("executing command");
                let outcome = executor::execute(&self.command_cfg, &command);
                info!(succeeded = outcome.succeeded, "summarizing result");
                let summary = summarizer::summarize(&self.oracle, &self.prompts, &outcome)?;
                state.execution_result = Some(outcome);
                state.final_summary = Some(non_empty(summary));
            }
            Route::Report => {
                info!("halting for safety");
                let reason = state
                    .critique
                    .as_ref()
                    .map(|v| v.reason.as_str())
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or(NO_REASON);
                state.final_summary = Some(format!("execution halted for safety: {reason}"));
            }
        }

        Ok(state)
    }
}

fn non_empty(summary: String) -> String {
    if summary.trim().is_empty() {
        EMPTY_SUMMARY.to_string()
    } else {
        summary
    }
}
