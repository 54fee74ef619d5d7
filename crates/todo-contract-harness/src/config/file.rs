// crates/todo-contract-harness/src/config/file.rs
// ============================================================================
// Module: Harness Config File
// Description: Optional TOML file supplying harness defaults.
// Purpose: Let a checked-in file pin the target and profile for a server build.
// Dependencies: serde, toml
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use super::env::ConfigError;
use crate::profile::ServerProfile;

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

/// Raw TOML configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the server under test.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_sec: Option<u64>,
    /// Expectation profile.
    pub profile: Option<ServerProfile>,
    /// Whether the server starts with its seed data.
    pub seeded: Option<bool>,
    /// Directory for run artifacts.
    pub run_root: Option<PathBuf>,
    /// `stderr` or a file path for JSON-lines audit events.
    pub audit_log: Option<String>,
    /// Issue the shutdown probe after a run.
    pub shutdown_after_run: Option<bool>,
}

impl ConfigFile {
    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, or not valid TOML.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }
}
