//! Critic stage: verdict on a candidate command.

use anyhow::Result;
use tracing::{debug, instrument, warn};

use crate::core::state::Verdict;
use crate::core::verdict::parse_verdict;
use crate::io::oracle::{Oracle, OracleRequest};
use crate::io::policy::{PolicyRules, PolicyStore};
use crate::io::prompt::PromptEngine;

/// Reason attached when no rule set is available.
pub const POLICY_UNAVAILABLE_REASON: &str = "policy unavailable";

/// Evaluate a candidate command against the safety rules.
///
/// Without a rule set there is nothing to evaluate against, so the verdict is
/// an immediate `Unsafe` and the oracle is never consulted. Malformed oracle
/// output degrades to `Unsafe` inside [`parse_verdict`]; only an oracle
/// transport failure propagates as an error.
#[instrument(skip_all, fields(command = %command))]
pub fn critique<O: Oracle>(
    oracle: &O,
    prompts: &PromptEngine,
    policy: &PolicyStore,
    command: &str,
) -> Result<Verdict> {
    let rules = match policy.load() {
        Ok(PolicyRules::Available(rules)) => rules,
        Ok(PolicyRules::Missing) => {
            return Ok(Verdict::unsafe_with(POLICY_UNAVAILABLE_REASON));
        }
        Err(err) => {
            warn!(err = %err, "policy load failed, refusing command");
            return Ok(Verdict::unsafe_with(POLICY_UNAVAILABLE_REASON));
        }
    };

    let system = prompts.critic_system(&rules)?;
    let request = OracleRequest::new(system).with("command to review", command);
    let response = oracle.complete(&request)?;
    let verdict = parse_verdict(&response);
    debug!(decision = ?verdict.decision, reason = %verdict.reason, "critic verdict");
    Ok(verdict)
}
