//! I/O helpers for the pipeline and CLI commands.

pub mod config;
pub mod oracle;
pub mod policy;
pub mod process;
pub mod prompt;
