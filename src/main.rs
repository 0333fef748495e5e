//! Policy-gated natural-language agent for cluster inspection.
//!
//! Turns an operator request into a `kubectl` command, vets it against the
//! safety policy in `.kubegate/policy.txt`, executes it only if approved,
//! and prints a human-readable summary.

use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kubegate::io::config::{AgentConfig, load_config, write_config};
use kubegate::io::oracle::CliOracle;
use kubegate::io::policy::{PolicyStore, write_default_policy};
use kubegate::logging;
use kubegate::pipeline::Pipeline;
use kubegate::session::run_session;

const CONFIG_PATH: &str = ".kubegate/config.toml";

#[derive(Parser)]
#[command(
    name = "kubegate",
    version,
    about = "Policy-gated natural-language cluster inspection"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.kubegate/config.toml` and the default policy file if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Run one request through the pipeline and print the summary.
    Ask {
        /// The request, e.g. "list pods in the default namespace".
        prompt: Vec<String>,
    },
    /// Interactive session: one request per line, 'exit' or 'quit' to end.
    Chat,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Ask { prompt } => cmd_ask(&prompt.join(" ")),
        Command::Chat => cmd_chat(),
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_PATH);
    if force || !config_path.exists() {
        write_config(config_path, &AgentConfig::default())?;
        println!("wrote {CONFIG_PATH}");
    }

    let cfg = load_config(config_path)?;
    if write_default_policy(Path::new(&cfg.policy_path), force)? {
        println!("wrote {}", cfg.policy_path);
    }
    Ok(())
}

fn cmd_ask(prompt: &str) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        anyhow::bail!("ask requires a non-empty prompt");
    }
    let pipeline = build_pipeline()?;
    let state = pipeline.run(prompt)?;
    let summary = state
        .final_summary
        .unwrap_or_else(|| "no summary was generated".to_string());
    println!("{summary}");
    Ok(())
}

fn cmd_chat() -> Result<()> {
    let pipeline = build_pipeline()?;
    let stdin = std::io::stdin();
    run_session(&pipeline, BufReader::new(stdin.lock()), std::io::stdout())
}

fn build_pipeline() -> Result<Pipeline<CliOracle>> {
    let cfg = load_config(Path::new(CONFIG_PATH))?;
    let oracle = CliOracle::from_config(&cfg.oracle).context("initialize oracle")?;
    let policy = PolicyStore::new(&cfg.policy_path);
    Ok(Pipeline::new(oracle, policy, &cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["kubegate", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["kubegate", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn parse_ask_collects_prompt_words() {
        let cli = Cli::parse_from(["kubegate", "ask", "list", "pods"]);
        match cli.command {
            Command::Ask { prompt } => assert_eq!(prompt.join(" "), "list pods"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn parse_chat() {
        let cli = Cli::parse_from(["kubegate", "chat"]);
        assert!(matches!(cli.command, Command::Chat));
    }
}
