//! Executor stage: argument-vector invocation of an approved command.

use std::process::Command;

use tracing::{debug, instrument, warn};

use crate::core::lexer::split_words;
use crate::core::state::ExecOutcome;
use crate::io::config::CommandConfig;
use crate::io::process::run_command;

/// Run an approved command, capturing stdout/stderr/exit status.
///
/// The command is tokenized with quote-aware word splitting and the binary is
/// invoked directly with the resulting argument vector; no shell is ever
/// involved. The leading token must equal the configured binary — a second
/// enforcement layer independent of the critic's policy judgment. Every
/// failure mode is folded into a failed [`ExecOutcome`] rather than an error,
/// so the pipeline always reaches the summarizer.
#[instrument(skip_all, fields(command = %command))]
pub fn execute(cfg: &CommandConfig, command: &str) -> ExecOutcome {
    let words = match split_words(command) {
        Ok(words) => words,
        Err(err) => {
            warn!(err = %err, "command failed to tokenize");
            return ExecOutcome::failure(format!("invalid command: {err}"));
        }
    };

    if words.first().map(String::as_str) != Some(cfg.binary.as_str()) {
        warn!(binary = %cfg.binary, "command does not start with the allowed binary");
        return ExecOutcome::failure(format!("command must start with '{}'", cfg.binary));
    }

    let mut cmd = Command::new(&words[0]);
    cmd.args(&words[1..]);

    let timeout = cfg.timeout_secs.map(std::time::Duration::from_secs);
    let output = match run_command(cmd, None, timeout, cfg.output_limit_bytes) {
        Ok(output) => output,
        Err(err) => {
            warn!(err = %err, "command invocation failed");
            return ExecOutcome::failure(format!("unexpected execution error: {err:#}"));
        }
    };

    if output.timed_out {
        return ExecOutcome::failure(format!(
            "unexpected execution error: command timed out after {}s",
            cfg.timeout_secs.unwrap_or_default()
        ));
    }
    if !output.status.success() {
        debug!(exit_code = ?output.status.code(), "command exited non-zero");
        return ExecOutcome::failure(format!("error: {}", output.stderr_lossy()));
    }

    ExecOutcome::success(output.stdout_lossy())
}
