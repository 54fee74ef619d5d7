// crates/todo-contract-harness/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for contract runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid or empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use super::file::ConfigFile;
use crate::profile::ServerProfile;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4567";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Base URL of the server under test.
    BaseUrl,
    /// Per-request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Expectation profile (`documented` or `observed`).
    Profile,
    /// Whether the server holds its seed data (`true`/`false` or `1`/`0`).
    Seeded,
    /// Directory for run artifacts.
    RunRoot,
    /// `stderr` or a file path for audit events.
    AuditLog,
    /// Issue the shutdown probe after a run (`true`/`false` or `1`/`0`).
    Shutdown,
    /// Path to an optional TOML config file.
    ConfigPath,
}

impl HarnessEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 8] = [
        Self::BaseUrl,
        Self::TimeoutSeconds,
        Self::Profile,
        Self::Seeded,
        Self::RunRoot,
        Self::AuditLog,
        Self::Shutdown,
        Self::ConfigPath,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "TODO_CONTRACT_BASE_URL",
            Self::TimeoutSeconds => "TODO_CONTRACT_TIMEOUT_SEC",
            Self::Profile => "TODO_CONTRACT_PROFILE",
            Self::Seeded => "TODO_CONTRACT_SEEDED",
            Self::RunRoot => "TODO_CONTRACT_RUN_ROOT",
            Self::AuditLog => "TODO_CONTRACT_AUDIT_LOG",
            Self::Shutdown => "TODO_CONTRACT_SHUTDOWN",
            Self::ConfigPath => "TODO_CONTRACT_CONFIG",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Configuration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Destination for JSON-lines audit events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditLogTarget {
    /// Write events to standard error.
    Stderr,
    /// Append events to a file.
    File(PathBuf),
}

impl AuditLogTarget {
    /// Parses `stderr` or a file path.
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("stderr") {
            Self::Stderr
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Typed harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base URL of the server under test.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Expectation profile.
    pub profile: ServerProfile,
    /// Whether scenarios that depend on seed data may run.
    pub seeded: bool,
    /// Directory for run artifacts; no artifacts are written when unset.
    pub run_root: Option<PathBuf>,
    /// Audit event destination; events are discarded when unset.
    pub audit_log: Option<AuditLogTarget>,
    /// Issue the shutdown probe after a run.
    pub shutdown_after_run: bool,
}

impl HarnessConfig {
    /// Returns the built-in defaults before any file or environment overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if [`DEFAULT_BASE_URL`] does not
    /// parse as an `http` base URL.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("DEFAULT_BASE_URL", DEFAULT_BASE_URL)?,
            timeout: DEFAULT_TIMEOUT,
            profile: ServerProfile::default(),
            seeded: true,
            run_root: None,
            audit_log: None,
            shutdown_after_run: false,
        })
    }

    /// Loads configuration from the environment, including the config file
    /// named by `TODO_CONTRACT_CONFIG` when set.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, or fails
    /// validation (for example, an invalid timeout, boolean, or URL).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration with an explicit config file path taking priority
    /// over `TODO_CONTRACT_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or any environment value is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::with_defaults()?;
        let env_path = read_env_nonempty(HarnessEnv::ConfigPath.as_str())?.map(PathBuf::from);
        if let Some(path) = path.map(Path::to_path_buf).or(env_path) {
            config.apply_file(&ConfigFile::read(&path)?)?;
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Overlays values present in a parsed config file.
    ///
    /// # Errors
    ///
    /// Returns an error when a file value fails validation.
    pub fn apply_file(&mut self, file: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(raw) = &file.base_url {
            self.base_url = parse_base_url("base_url", raw)?;
        }
        if let Some(secs) = file.timeout_sec {
            if secs == 0 {
                let message = "timeout_sec must be greater than zero".to_string();
                return Err(ConfigError::Invalid(message));
            }
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(profile) = file.profile {
            self.profile = profile;
        }
        if let Some(seeded) = file.seeded {
            self.seeded = seeded;
        }
        if let Some(run_root) = &file.run_root {
            self.run_root = Some(run_root.clone());
        }
        if let Some(raw) = &file.audit_log {
            if raw.trim().is_empty() {
                return Err(ConfigError::Invalid("audit_log must not be empty".to_string()));
            }
            self.audit_log = Some(AuditLogTarget::parse(raw));
        }
        if let Some(shutdown) = file.shutdown_after_run {
            self.shutdown_after_run = shutdown;
        }
        Ok(())
    }

    /// Overlays values present in the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value fails validation.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        let base_url_key = HarnessEnv::BaseUrl.as_str();
        if let Some(raw) = read_env_nonempty(base_url_key)? {
            self.base_url = parse_base_url(base_url_key, &raw)?;
        }
        let timeout_key = HarnessEnv::TimeoutSeconds.as_str();
        if let Some(raw) = read_env_nonempty(timeout_key)? {
            self.timeout = parse_timeout_seconds(timeout_key, &raw)?;
        }
        if let Some(raw) = read_env_nonempty(HarnessEnv::Profile.as_str())? {
            self.profile = raw.parse().map_err(ConfigError::Invalid)?;
        }
        let seeded_key = HarnessEnv::Seeded.as_str();
        if let Some(raw) = read_env_nonempty(seeded_key)? {
            self.seeded = parse_bool(seeded_key, &raw)?;
        }
        if let Some(raw) = read_env_nonempty(HarnessEnv::RunRoot.as_str())? {
            self.run_root = Some(PathBuf::from(raw));
        }
        if let Some(raw) = read_env_nonempty(HarnessEnv::AuditLog.as_str())? {
            self.audit_log = Some(AuditLogTarget::parse(&raw));
        }
        let shutdown_key = HarnessEnv::Shutdown.as_str();
        if let Some(raw) = read_env_nonempty(shutdown_key)? {
            self.shutdown_after_run = parse_bool(shutdown_key, &raw)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates an `http`/`https` base URL.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for unparsable URLs, other schemes, or URLs
/// carrying a query or fragment.
pub fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ConfigError::Invalid(format!("{name} must be an absolute url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("{name} must use http or https")));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::Invalid(format!("{name} must include a host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::Invalid(format!("{name} must not carry a query or fragment")));
    }
    Ok(url)
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean literal.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::Invalid(format!("{name} must be 1, 0, true, or false")))
}
