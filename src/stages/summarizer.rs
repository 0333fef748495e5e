//! Summarizer stage: raw command output to a human-readable digest.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::state::ExecOutcome;
use crate::io::oracle::{Oracle, OracleRequest};
use crate::io::prompt::PromptEngine;

/// Turn an execution outcome into the final message for the operator.
///
/// Failed outcomes short-circuit to a fixed message without consulting the
/// oracle; there is nothing useful to digest and summarizing error text just
/// muddies it. Successful output goes to the oracle and the response is kept
/// verbatim.
#[instrument(skip_all, fields(succeeded = outcome.succeeded))]
pub fn summarize<O: Oracle>(
    oracle: &O,
    prompts: &PromptEngine,
    outcome: &ExecOutcome,
) -> Result<String> {
    if !outcome.succeeded {
        debug!("execution failed, skipping oracle digest");
        return Ok(format!("command failed to execute: {}", outcome.output));
    }

    let system = prompts.summarizer_system()?;
    let request = OracleRequest::new(system).with("command output", &outcome.output);
    let summary = oracle.complete(&request).context("summarize output")?;
    debug!(bytes = summary.len(), "summary generated");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedOracle;

    #[test]
    fn failed_outcome_short_circuits_without_oracle_call() {
        let oracle = ScriptedOracle::new(["should never be consulted"]);
        let prompts = PromptEngine::new("kubectl");
        let outcome = ExecOutcome::failure("error: connection refused");

        let summary = summarize(&oracle, &prompts, &outcome).expect("summarize");
        assert_eq!(summary, "command failed to execute: error: connection refused");
        assert_eq!(oracle.call_count(), 0);
    }

    #[test]
    fn successful_outcome_gets_an_oracle_digest() {
        let oracle = ScriptedOracle::new(["Three pods are running in the default namespace."]);
        let prompts = PromptEngine::new("kubectl");
        let outcome = ExecOutcome::success(r#"{"items": [1, 2, 3]}"#);

        let summary = summarize(&oracle, &prompts, &outcome).expect("summarize");
        assert_eq!(summary, "Three pods are running in the default namespace.");

        let requests = oracle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].content,
            vec![(
                "command output".to_string(),
                r#"{"items": [1, 2, 3]}"#.to_string()
            )]
        );
    }
}
