//! Generator stage: natural-language request to candidate command.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::io::oracle::{Oracle, OracleRequest};
use crate::io::prompt::PromptEngine;

/// Produce a candidate command for the operator's request.
///
/// The oracle response is trimmed and stored verbatim; no validation happens
/// here. That is deliberate: the critic and the executor each enforce safety
/// independently. An oracle failure is fatal for the request.
#[instrument(skip_all)]
pub fn generate<O: Oracle>(
    oracle: &O,
    prompts: &PromptEngine,
    user_prompt: &str,
) -> Result<String> {
    let system = prompts.generator_system()?;
    let request = OracleRequest::new(system).with("request", user_prompt);
    let response = oracle.complete(&request).context("generate command")?;
    let command = response.trim().to_string();
    debug!(command = %command, "generated candidate command");
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingOracle, ScriptedOracle};

    #[test]
    fn trims_and_returns_oracle_response() {
        let oracle = ScriptedOracle::new(["  kubectl get pods -n default -o json\n"]);
        let prompts = PromptEngine::new("kubectl");

        let command = generate(&oracle, &prompts, "list pods in default").expect("generate");
        assert_eq!(command, "kubectl get pods -n default -o json");
    }

    #[test]
    fn sends_request_as_named_content() {
        let oracle = ScriptedOracle::new(["kubectl get pods -o json"]);
        let prompts = PromptEngine::new("kubectl");

        generate(&oracle, &prompts, "list pods").expect("generate");
        let requests = oracle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].content,
            vec![("request".to_string(), "list pods".to_string())]
        );
        assert!(requests[0].system.contains("`kubectl`"));
    }

    #[test]
    fn oracle_failure_is_fatal() {
        let prompts = PromptEngine::new("kubectl");
        let err = generate(&FailingOracle, &prompts, "list pods").unwrap_err();
        assert!(err.to_string().contains("generate command"));
    }
}
