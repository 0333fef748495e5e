//! Oracle abstraction for text completion.
//!
//! The [`Oracle`] trait decouples pipeline stages from the completion backend
//! (currently any LLM CLI that reads a prompt on stdin and prints the
//! response). Tests use scripted oracles that return predetermined responses
//! without spawning processes.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::io::config::OracleConfig;
use crate::io::process::run_command;

/// One completion request: fixed system instructions plus named user content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub system: String,
    pub content: Vec<(String, String)>,
}

impl OracleRequest {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            content: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.push((key.into(), value.into()));
        self
    }

    /// Render the request as a single prompt document for stdin delivery.
    pub fn render(&self) -> String {
        let mut buf = String::new();
        buf.push_str(self.system.trim_end());
        buf.push('\n');
        for (key, value) in &self.content {
            buf.push_str(&format!("\n## {key}\n\n{value}\n"));
        }
        buf
    }
}

/// Abstraction over completion backends.
pub trait Oracle {
    /// Complete the request, returning the raw response text.
    fn complete(&self, request: &OracleRequest) -> Result<String>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn complete(&self, request: &OracleRequest) -> Result<String> {
        (**self).complete(request)
    }
}

/// Oracle that spawns a configured LLM CLI per request.
///
/// The rendered request is piped over stdin; whatever the process prints to
/// stdout is the response. Reentrant for sequential calls; no thread-safety
/// guarantee is made for parallel invocation.
pub struct CliOracle {
    argv: Vec<String>,
    timeout: Duration,
    output_limit_bytes: usize,
}

impl CliOracle {
    /// Build from config. An empty argument vector is a setup error, caught
    /// here so the pipeline never starts with an unusable oracle.
    pub fn from_config(cfg: &OracleConfig) -> Result<Self> {
        if cfg.command.is_empty() || cfg.command[0].trim().is_empty() {
            return Err(anyhow!("oracle command is empty (check oracle.command in config.toml)"));
        }
        Ok(Self {
            argv: cfg.command.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            output_limit_bytes: cfg.output_limit_bytes,
        })
    }
}

impl Oracle for CliOracle {
    #[instrument(skip_all, fields(backend = %self.argv[0], timeout_secs = self.timeout.as_secs()))]
    fn complete(&self, request: &OracleRequest) -> Result<String> {
        info!("starting oracle call");

        let mut cmd = Command::new(&self.argv[0]);
        cmd.args(&self.argv[1..]);

        let prompt = request.render();
        let output = run_command(
            cmd,
            Some(prompt.as_bytes()),
            Some(self.timeout),
            self.output_limit_bytes,
        )
        .context("run oracle backend")?;

        if output.timed_out {
            warn!(timeout_secs = self.timeout.as_secs(), "oracle call timed out");
            return Err(anyhow!("oracle call timed out after {:?}", self.timeout));
        }
        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "oracle backend failed");
            return Err(anyhow!(
                "oracle backend failed with status {:?}: {}",
                output.status.code(),
                output.stderr_lossy().trim()
            ));
        }

        debug!(bytes = output.stdout.len(), "oracle call completed");
        Ok(output.stdout_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_renders_system_and_content_sections() {
        let request = OracleRequest::new("Do the thing.")
            .with("request", "list pods")
            .with("context", "default namespace");
        let rendered = request.render();
        assert!(rendered.starts_with("Do the thing.\n"));
        assert!(rendered.contains("## request\n\nlist pods\n"));
        assert!(rendered.contains("## context\n\ndefault namespace\n"));
    }

    #[test]
    fn from_config_rejects_empty_command() {
        let cfg = OracleConfig {
            command: Vec::new(),
            ..OracleConfig::default()
        };
        assert!(CliOracle::from_config(&cfg).is_err());
    }

    #[test]
    fn cli_oracle_pipes_request_and_captures_stdout() {
        let cfg = OracleConfig {
            command: vec!["cat".to_string()],
            timeout_secs: 5,
            output_limit_bytes: 10_000,
        };
        let oracle = CliOracle::from_config(&cfg).expect("oracle");
        let request = OracleRequest::new("system text").with("request", "hello");
        let response = oracle.complete(&request).expect("complete");
        assert!(response.contains("system text"));
        assert!(response.contains("## request"));
    }

    #[test]
    fn cli_oracle_surfaces_backend_failure() {
        let cfg = OracleConfig {
            command: vec![
                "sh".to_string(),
                "-c".to_string(),
                "cat >/dev/null; echo bad >&2; exit 2".to_string(),
            ],
            timeout_secs: 5,
            output_limit_bytes: 10_000,
        };
        let oracle = CliOracle::from_config(&cfg).expect("oracle");
        let err = oracle
            .complete(&OracleRequest::new("system"))
            .unwrap_err();
        assert!(err.to_string().contains("oracle backend failed"));
        assert!(err.to_string().contains("bad"));
    }
}
