//! Safety rule storage for the critic.
//!
//! Rules are free-form UTF-8 prose, loaded whole and passed verbatim into the
//! critic's oracle request. A missing rule file is a distinguished load
//! condition, not an error: the critic reacts to it by refusing every
//! command.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Default rule set written by `kubegate init`.
pub const DEFAULT_POLICY: &str = "\
1. The command must start with 'kubectl'.
2. The allowed actions are 'get', 'describe', and 'logs'. Any other action \
(like 'delete', 'apply', 'exec', 'edit', 'create', 'rollout') is strictly forbidden.
3. For commands that support it (like 'get' and 'describe'), the command should \
include the '-o json' output flag.
4. The command must not contain any shell operators like ';', '&&', '||', '|', \
'>', '<', or '`'. It must be a single, standalone command.
";

/// Outcome of loading the rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyRules {
    /// Rule text, passed verbatim to the critic.
    Available(String),
    /// No rule file at the configured path.
    Missing,
}

/// Read-only source of the safety rule text.
///
/// Immutable after construction, safe to share across sequential runs.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    path: PathBuf,
}

impl PolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the rule set. Absence maps to `PolicyRules::Missing`; only
    /// genuine I/O failures (permissions, encoding) surface as errors.
    pub fn load(&self) -> Result<PolicyRules> {
        match fs::read_to_string(&self.path) {
            Ok(rules) => {
                debug!(path = %self.path.display(), bytes = rules.len(), "loaded policy rules");
                Ok(PolicyRules::Available(rules))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "policy rule file not found");
                Ok(PolicyRules::Missing)
            }
            Err(err) => {
                Err(err).with_context(|| format!("read policy {}", self.path.display()))
            }
        }
    }
}

/// Write the default rule file. Returns whether anything was written.
pub fn write_default_policy(path: &Path, force: bool) -> Result<bool> {
    if !force && path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create policy dir {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_POLICY).with_context(|| format!("write {}", path.display()))?;
    Ok(true)
}
