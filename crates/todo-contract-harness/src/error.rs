// crates/todo-contract-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Error taxonomy for contract-test execution.
// Purpose: Report connectivity, contract, and body failures with request context.
// Dependencies: thiserror, reqwest
// ============================================================================

//! ## Overview
//! Every failure the harness can observe maps to one [`HarnessError`] variant.
//! Only [`HarnessError::Unreachable`] is fatal to a run; every other variant
//! fails the scenario that raised it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Failures raised while exercising the Todo Manager API.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Pre-flight probe could not reach the server or got a non-200 answer.
    #[error("api is not active or could not connect at {url}: {reason}")]
    Unreachable {
        /// Probed URL.
        url: String,
        /// Connection error or unexpected status.
        reason: String,
    },
    /// A request failed below HTTP (refused, reset, timed out).
    #[error("{method} {url} failed: {source}")]
    Transport {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The response status is not one of the accepted codes.
    #[error("{method} {url} returned {actual}, expected {expected}: {body_excerpt}")]
    UnexpectedStatus {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Accepted status codes, rendered for display.
        expected: String,
        /// Observed status code.
        actual: u16,
        /// Leading part of the response body.
        body_excerpt: String,
    },
    /// A required JSON field is absent.
    #[error("{context}: missing field `{field}`")]
    MissingField {
        /// Field name or JSON pointer.
        field: String,
        /// Request the body came from.
        context: String,
    },
    /// A JSON field is present but unusable.
    #[error("{context}: invalid field `{field}`: {reason}")]
    InvalidField {
        /// Field name or JSON pointer.
        field: String,
        /// Request the body came from.
        context: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The response body could not be decoded as JSON.
    #[error("{method} {url} returned a malformed body: {reason}")]
    MalformedBody {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Decoder message.
        reason: String,
    },
    /// A header or body expectation did not hold.
    #[error("{method} {url} violated `{expectation}`: {detail}")]
    Expectation {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Expectation label.
        expectation: String,
        /// Observed mismatch.
        detail: String,
    },
    /// Fixture deletion failed after the scenario body succeeded.
    #[error("cleanup of {kind} {id} failed: {reason}")]
    Cleanup {
        /// Fixture kind label.
        kind: &'static str,
        /// Fixture identifier.
        id: u64,
        /// Underlying failure.
        reason: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Report artifacts could not be written.
    #[error("artifact write failed: {0}")]
    Artifact(String),
}

impl HarnessError {
    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable {
                ..
            } => "unreachable",
            Self::Transport {
                ..
            } => "transport",
            Self::UnexpectedStatus {
                ..
            } => "unexpected_status",
            Self::MissingField {
                ..
            } => "missing_field",
            Self::InvalidField {
                ..
            } => "invalid_field",
            Self::MalformedBody {
                ..
            } => "malformed_body",
            Self::Expectation {
                ..
            } => "expectation",
            Self::Cleanup {
                ..
            } => "cleanup",
            Self::ClientBuild(_) => "client_build",
            Self::Config(_) => "config",
            Self::Artifact(_) => "artifact",
        }
    }
}
