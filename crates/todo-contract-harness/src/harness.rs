// crates/todo-contract-harness/src/harness.rs
// ============================================================================
// Module: Contract Harness
// Description: Fixture-backed contract operations against a live server.
// Purpose: Probe readiness, manage fixtures, and assert HTTP contracts.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ContractHarness`] wraps an [`ApiClient`] with the operations scenarios
//! are written in: pre-flight probe, fixture create/delete, scoped fixtures
//! that always clean up, method-not-allowed checks, general contract checks,
//! and the post-run shutdown probe.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::audit::CleanupAuditEvent;
use crate::audit::HarnessAuditSink;
use crate::audit::ShutdownAuditEvent;
use crate::audit::sink_for;
use crate::client::ApiClient;
use crate::config::ConfigError;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::model::FixtureId;
use crate::model::FixtureKind;
use crate::model::created_id;
use crate::profile::ServerProfile;
use crate::response::ApiResponse;

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Contract-test harness bound to one server and one expectation profile.
#[derive(Clone)]
pub struct ContractHarness {
    client: ApiClient,
    profile: ServerProfile,
    seeded: bool,
}

impl ContractHarness {
    /// Builds the client and audit sink described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ClientBuild`] when the HTTP client cannot be
    /// built and [`HarnessError::Config`] when the audit log cannot be opened.
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        let sink = sink_for(config.audit_log.as_ref())
            .map_err(|err| ConfigError::Io(format!("failed to open audit log: {err}")))?;
        let client = ApiClient::new(config.base_url.clone(), config.timeout)?.with_audit_sink(sink);
        Ok(Self::from_client(client, config.profile, config.seeded))
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: ApiClient, profile: ServerProfile, seeded: bool) -> Self {
        Self {
            client,
            profile,
            seeded,
        }
    }

    /// Selected expectation profile.
    #[must_use]
    pub const fn profile(&self) -> ServerProfile {
        self.profile
    }

    /// Whether the server is assumed to hold its seed data.
    #[must_use]
    pub const fn seeded(&self) -> bool {
        self.seeded
    }

    /// Underlying client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Audit sink shared with the client.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn HarnessAuditSink> {
        self.client.audit()
    }

    // ------------------------------------------------------------------------
    // Readiness
    // ------------------------------------------------------------------------

    /// Probes `GET /` and requires `200`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Unreachable`] when the server cannot be reached
    /// or answers with any other status.
    pub fn ensure_system_ready(&self) -> HarnessResult<()> {
        let url = self.client.url_for("/");
        let response = self.client.get("/").map_err(|err| HarnessError::Unreachable {
            url: url.clone(),
            reason: transport_reason(&err),
        })?;
        if response.status().as_u16() != 200 {
            return Err(HarnessError::Unreachable {
                url,
                reason: format!("probe returned {}", response.status().as_u16()),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------------

    /// Creates a resource, requires `201`, and returns its id.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any status other than `201`, a non-JSON
    /// body, or an absent or invalid `id`.
    pub fn create_fixture<P: Serialize>(
        &self,
        kind: FixtureKind,
        payload: &P,
    ) -> HarnessResult<FixtureId> {
        let body = serde_json::to_value(payload).map_err(|err| HarnessError::InvalidField {
            field: "payload".to_string(),
            context: format!("POST {}", kind.collection()),
            reason: err.to_string(),
        })?;
        let response = self.client.post(kind.collection(), &body)?;
        response.require_status(&[201])?;
        created_id(&response.json()?, &response.context())
    }

    /// Deletes a resource; `200` and `204` are success.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any other status.
    pub fn delete_fixture(&self, kind: FixtureKind, id: FixtureId) -> HarnessResult<()> {
        self.client.delete(&kind.item_path(id))?.require_status(&[200, 204])
    }

    /// Creates a resource and returns a guard that deletes it.
    ///
    /// # Errors
    ///
    /// See [`ContractHarness::create_fixture`].
    pub fn fixture<P: Serialize>(
        &self,
        kind: FixtureKind,
        payload: &P,
    ) -> HarnessResult<FixtureGuard<'_>> {
        let id = self.create_fixture(kind, payload)?;
        Ok(self.adopt(kind, id))
    }

    /// Takes ownership of a resource created some other way.
    #[must_use]
    pub const fn adopt(&self, kind: FixtureKind, id: FixtureId) -> FixtureGuard<'_> {
        FixtureGuard {
            harness: self,
            kind,
            id,
            armed: true,
        }
    }

    /// Creates a resource, runs `body` with its id, then deletes it whether or
    /// not `body` succeeded.
    ///
    /// # Errors
    ///
    /// Returns `body`'s error when it fails; a cleanup failure after that is
    /// only audited. When `body` succeeds, a cleanup failure is returned as
    /// [`HarnessError::Cleanup`].
    pub fn with_fixture<P, T, F>(&self, kind: FixtureKind, payload: &P, body: F) -> HarnessResult<T>
    where
        P: Serialize,
        F: FnOnce(FixtureId) -> HarnessResult<T>,
    {
        let id = self.create_fixture(kind, payload)?;
        self.with_cleanup(kind, id, || body(id), || self.delete_fixture(kind, id))
    }

    /// Runs `body`, then `cleanup` whether or not `body` succeeded. `kind`
    /// and `id` name the resource `cleanup` puts back in order.
    ///
    /// # Errors
    ///
    /// Same precedence as [`ContractHarness::with_fixture`]: `body`'s error
    /// wins and a later cleanup failure is only audited.
    pub fn with_cleanup<T, F, C>(
        &self,
        kind: FixtureKind,
        id: FixtureId,
        body: F,
        cleanup: C,
    ) -> HarnessResult<T>
    where
        F: FnOnce() -> HarnessResult<T>,
        C: FnOnce() -> HarnessResult<()>,
    {
        let outcome = body();
        let cleanup = cleanup();
        match (outcome, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(cleanup_error(kind, id, &err)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(cleanup)) => {
                self.record_cleanup_failure(kind, id, &cleanup);
                Err(err)
            }
        }
    }

    /// Emits a `fixture_cleanup_failed` audit event.
    fn record_cleanup_failure(&self, kind: FixtureKind, id: FixtureId, err: &HarnessError) {
        let event = CleanupAuditEvent::new(kind.label(), id.get(), err.to_string());
        self.audit().record_cleanup(&event);
    }

    // ------------------------------------------------------------------------
    // Contract Checks
    // ------------------------------------------------------------------------

    /// Issues `method path` and requires `405 Method Not Allowed`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any other status.
    pub fn assert_method_not_allowed(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> HarnessResult<ApiResponse> {
        let response = self.client.send(method, path, body)?;
        response.require_status(&[405])?;
        Ok(response)
    }

    /// Issues the check's request and verifies status and expectations.
    ///
    /// # Errors
    ///
    /// Returns the transport error or the first failing rule.
    pub fn assert_contract(&self, check: &ContractCheck) -> HarnessResult<ApiResponse> {
        let response = self.client.send(check.method.clone(), &check.path, check.body.as_ref())?;
        check.verify(&response)?;
        Ok(response)
    }

    // ------------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------------

    /// Asks a still-running server to stop via `GET /shutdown`.
    ///
    /// A dropped connection on `/shutdown` counts as acknowledged: the server
    /// typically exits before answering.
    pub fn shutdown_probe(&self) -> ShutdownOutcome {
        let alive = self.client.get("/").is_ok_and(|response| response.status().as_u16() == 200);
        let outcome = if !alive {
            ShutdownOutcome::AlreadyDown
        } else {
            match self.client.get("/shutdown") {
                Ok(response) => ShutdownOutcome::Acknowledged(response.status().as_u16()),
                Err(_) => ShutdownOutcome::ConnectionClosed,
            }
        };
        self.audit().record_shutdown(&ShutdownAuditEvent::new(outcome.to_string()));
        outcome
    }
}

/// Converts a delete failure into a cleanup error.
fn cleanup_error(kind: FixtureKind, id: FixtureId, err: &HarnessError) -> HarnessError {
    HarnessError::Cleanup {
        kind: kind.label(),
        id: id.get(),
        reason: err.to_string(),
    }
}

/// Extracts the connection-level cause from a transport error.
fn transport_reason(err: &HarnessError) -> String {
    match err {
        HarnessError::Transport {
            source, ..
        } => source.to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Fixture Guard
// ============================================================================

/// Scoped fixture; deletes its resource on [`FixtureGuard::release`] or drop.
pub struct FixtureGuard<'a> {
    harness: &'a ContractHarness,
    kind: FixtureKind,
    id: FixtureId,
    armed: bool,
}

impl FixtureGuard<'_> {
    /// Resource id.
    #[must_use]
    pub const fn id(&self) -> FixtureId {
        self.id
    }

    /// Resource kind.
    #[must_use]
    pub const fn kind(&self) -> FixtureKind {
        self.kind
    }

    /// Item path of the resource.
    #[must_use]
    pub fn path(&self) -> String {
        self.kind.item_path(self.id)
    }

    /// Deletes the resource now and reports failures.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Cleanup`] when the delete fails.
    pub fn release(mut self) -> HarnessResult<()> {
        self.armed = false;
        self.harness
            .delete_fixture(self.kind, self.id)
            .map_err(|err| cleanup_error(self.kind, self.id, &err))
    }

    /// Gives up ownership without deleting, for scenarios that delete the
    /// resource themselves.
    #[must_use]
    pub fn disarm(mut self) -> FixtureId {
        self.armed = false;
        self.id
    }
}

impl Drop for FixtureGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = self.harness.delete_fixture(self.kind, self.id) {
            self.harness.record_cleanup_failure(self.kind, self.id, &err);
        }
    }
}

impl fmt::Debug for FixtureGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureGuard")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish()
    }
}

// ============================================================================
// SECTION: Shutdown Outcome
// ============================================================================

/// Result of [`ContractHarness::shutdown_probe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// `/shutdown` answered with this status.
    Acknowledged(u16),
    /// The connection dropped while requesting `/shutdown`.
    ConnectionClosed,
    /// `GET /` no longer answered 200; no shutdown request was sent.
    AlreadyDown,
}

impl fmt::Display for ShutdownOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acknowledged(status) => write!(f, "acknowledged ({status})"),
            Self::ConnectionClosed => f.write_str("connection_closed"),
            Self::AlreadyDown => f.write_str("already_down"),
        }
    }
}
