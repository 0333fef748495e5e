//! Interactive chat session around the pipeline.
//!
//! One line of free text per turn, one printed summary per turn. The session
//! loop owns the exit conventions; the pipeline knows nothing about them.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::io::oracle::Oracle;
use crate::pipeline::Pipeline;

const PROMPT: &str = "kubegate> ";

/// Whether a line ends the session.
pub fn is_terminator(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "exit" | "quit")
}

/// Run the line-per-turn loop until EOF or a terminator.
///
/// Blank lines are skipped. Each turn drives a full pipeline run; fatal
/// errors (oracle transport failures) end the session since later turns
/// would hit the same wall.
pub fn run_session<O: Oracle, R: BufRead, W: Write>(
    pipeline: &Pipeline<O>,
    input: R,
    mut output: W,
) -> Result<()> {
    write!(output, "{PROMPT}").context("write prompt")?;
    output.flush().context("flush prompt")?;

    for line in input.lines() {
        let line = line.context("read input line")?;
        if is_terminator(&line) {
            break;
        }
        if line.trim().is_empty() {
            write!(output, "{PROMPT}").context("write prompt")?;
            output.flush().context("flush prompt")?;
            continue;
        }

        info!(prompt = %line.trim(), "session turn");
        let state = pipeline.run(line.trim())?;
        let summary = state
            .final_summary
            .unwrap_or_else(|| "no summary was generated".to_string());
        writeln!(output, "{summary}").context("write summary")?;

        write!(output, "{PROMPT}").context("write prompt")?;
        output.flush().context("flush prompt")?;
    }

    writeln!(output).context("write trailing newline")?;
    Ok(())
}
