// crates/todo-contract-harness/src/audit.rs
// ============================================================================
// Module: Harness Audit Logging
// Description: Structured audit events for contract-test runs.
// Purpose: Emit JSON-lines logs of HTTP exchanges and scenario outcomes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for harness logging.
//! Every HTTP exchange, scenario result, failed fixture cleanup, and shutdown
//! probe is emitted as one JSON object per line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::config::AuditLogTarget;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for an HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeOutcome {
    /// A response was received (any status).
    Response,
    /// The request failed below HTTP.
    TransportError,
}

/// Audit payload for one HTTP request/response pair.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Response status when one was received.
    pub status: Option<u16>,
    /// Exchange outcome.
    pub outcome: ExchangeOutcome,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock duration of the exchange.
    pub duration_ms: u128,
    /// Transport error message when present.
    pub error: Option<String>,
}

/// Audit payload for a finished scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Suite name.
    pub suite: String,
    /// Scenario name.
    pub scenario: String,
    /// Selected server profile.
    pub profile: &'static str,
    /// `passed`, `failed`, or `skipped`.
    pub status: &'static str,
    /// Error kind label for failures.
    pub error_kind: Option<&'static str>,
    /// Failure or skip message.
    pub message: Option<String>,
    /// Scenario duration.
    pub duration_ms: u128,
}

/// Audit payload for a fixture that could not be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Fixture kind label.
    pub kind: &'static str,
    /// Fixture identifier.
    pub id: u64,
    /// Failure message.
    pub reason: String,
}

/// Audit payload for the post-run shutdown probe.
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Outcome label.
    pub outcome: String,
}

/// Returns the current wall-clock time in milliseconds.
#[must_use]
pub fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

impl CleanupAuditEvent {
    /// Creates a cleanup event with a consistent timestamp.
    #[must_use]
    pub fn new(kind: &'static str, id: u64, reason: String) -> Self {
        Self {
            event: "fixture_cleanup_failed",
            timestamp_ms: now_millis(),
            kind,
            id,
            reason,
        }
    }
}

impl ShutdownAuditEvent {
    /// Creates a shutdown event with a consistent timestamp.
    #[must_use]
    pub fn new(outcome: String) -> Self {
        Self {
            event: "shutdown_probe",
            timestamp_ms: now_millis(),
            outcome,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for harness events.
pub trait HarnessAuditSink: Send + Sync {
    /// Record an HTTP exchange.
    fn record_exchange(&self, event: &ExchangeAuditEvent);

    /// Record a scenario result.
    fn record_scenario(&self, _event: &ScenarioAuditEvent) {}

    /// Record a failed fixture cleanup.
    fn record_cleanup(&self, _event: &CleanupAuditEvent) {}

    /// Record the shutdown probe outcome.
    fn record_shutdown(&self, _event: &ShutdownAuditEvent) {}
}

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error when a file target cannot be opened.
pub fn sink_for(target: Option<&AuditLogTarget>) -> io::Result<Arc<dyn HarnessAuditSink>> {
    Ok(match target {
        None => Arc::new(NoopAuditSink),
        Some(AuditLogTarget::Stderr) => Arc::new(StderrAuditSink),
        Some(AuditLogTarget::File(path)) => Arc::new(FileAuditSink::new(path)?),
    })
}

/// Writes one serialized event as a line.
fn write_line<W: Write, T: Serialize>(writer: &mut W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
        let _ = writer.flush();
    }
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl HarnessAuditSink for StderrAuditSink {
    fn record_exchange(&self, event: &ExchangeAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_cleanup(&self, event: &CleanupAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_shutdown(&self, event: &ShutdownAuditEvent) {
        write_line(&mut io::stderr(), event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event under the file lock.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(mut file) = self.file.lock() {
            write_line(&mut *file, event);
        }
    }
}

impl HarnessAuditSink for FileAuditSink {
    fn record_exchange(&self, event: &ExchangeAuditEvent) {
        self.append(event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.append(event);
    }

    fn record_cleanup(&self, event: &CleanupAuditEvent) {
        self.append(event);
    }

    fn record_shutdown(&self, event: &ShutdownAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl HarnessAuditSink for NoopAuditSink {
    fn record_exchange(&self, _event: &ExchangeAuditEvent) {}
}
