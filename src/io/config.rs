//! Agent configuration stored under `.kubegate/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Agent configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    pub oracle: OracleConfig,
    pub command: CommandConfig,
    /// Path to the safety rule file, relative to the agent root.
    pub policy_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    /// Argument vector for the completion backend (e.g. `["claude", "-p"]`).
    /// The rendered request is piped over stdin; stdout is the response.
    pub command: Vec<String>,

    /// Wall-clock budget per oracle call in seconds.
    pub timeout_secs: u64,

    /// Truncate oracle responses beyond this many bytes.
    pub output_limit_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandConfig {
    /// The one binary a generated command is allowed to invoke.
    pub binary: String,

    /// Wall-clock budget for command execution in seconds. Absent means no
    /// timeout: the command is waited on until it finishes.
    pub timeout_secs: Option<u64>,

    /// Truncate command stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            command: vec!["claude".to_string(), "-p".to_string()],
            timeout_secs: 120,
            output_limit_bytes: 200_000,
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            binary: "kubectl".to_string(),
            timeout_secs: None,
            output_limit_bytes: 200_000,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            oracle: OracleConfig::default(),
            command: CommandConfig::default(),
            policy_path: ".kubegate/policy.txt".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.oracle.command.is_empty() || self.oracle.command[0].trim().is_empty() {
            return Err(anyhow!("oracle.command must be a non-empty array"));
        }
        if self.oracle.timeout_secs == 0 {
            return Err(anyhow!("oracle.timeout_secs must be > 0"));
        }
        if self.oracle.output_limit_bytes == 0 {
            return Err(anyhow!("oracle.output_limit_bytes must be > 0"));
        }
        if self.command.binary.trim().is_empty() {
            return Err(anyhow!("command.binary must be non-empty"));
        }
        if self.command.timeout_secs == Some(0) {
            return Err(anyhow!("command.timeout_secs must be > 0 when set"));
        }
        if self.command.output_limit_bytes == 0 {
            return Err(anyhow!("command.output_limit_bytes must be > 0"));
        }
        if self.policy_path.trim().is_empty() {
            return Err(anyhow!("policy_path must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AgentConfig::default()`.
pub fn load_config(path: &Path) -> Result<AgentConfig> {
    if !path.exists() {
        let cfg = AgentConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AgentConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &AgentConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, AgentConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let mut cfg = AgentConfig::default();
        cfg.command.binary = "echo".to_string();
        cfg.command.timeout_secs = Some(30);
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn empty_oracle_command_is_rejected() {
        let mut cfg = AgentConfig::default();
        cfg.oracle.command = Vec::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_command_timeout_is_rejected() {
        let mut cfg = AgentConfig::default();
        cfg.command.timeout_secs = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn no_command_timeout_by_default() {
        assert_eq!(AgentConfig::default().command.timeout_secs, None);
    }
}
