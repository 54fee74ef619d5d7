// crates/todo-contract-harness/tests/helpers/mod.rs
// ============================================================================
// Module: Harness Test Helpers
// Description: Shared stub server, recording sink, and harness builders.
// Dependencies: todo-contract-harness
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a different subset of helpers.")]

pub mod todo_stub;

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use todo_contract_harness::ApiClient;
use todo_contract_harness::ContractHarness;
use todo_contract_harness::ServerProfile;
use todo_contract_harness::audit::CleanupAuditEvent;
use todo_contract_harness::audit::ExchangeAuditEvent;
use todo_contract_harness::audit::HarnessAuditSink;
use todo_contract_harness::audit::ScenarioAuditEvent;
use todo_contract_harness::audit::ShutdownAuditEvent;
use url::Url;

/// Sink that keeps event names in memory.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
    cleanups: Mutex<Vec<(String, u64)>>,
}

impl RecordingSink {
    /// Event names in emission order.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    /// `(kind, id)` of every failed cleanup.
    pub fn cleanups(&self) -> Vec<(String, u64)> {
        self.cleanups.lock().map_or_else(|_| Vec::new(), |cleanups| cleanups.clone())
    }

    fn push(&self, event: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.to_string());
        }
    }
}

impl HarnessAuditSink for RecordingSink {
    fn record_exchange(&self, event: &ExchangeAuditEvent) {
        self.push(event.event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.push(event.event);
    }

    fn record_cleanup(&self, event: &CleanupAuditEvent) {
        self.push(event.event);
        if let Ok(mut cleanups) = self.cleanups.lock() {
            cleanups.push((event.kind.to_string(), event.id));
        }
    }

    fn record_shutdown(&self, event: &ShutdownAuditEvent) {
        self.push(event.event);
    }
}

/// Builds a harness against `base_url` that reports into `sink`.
pub fn harness_for(
    base_url: &str,
    profile: ServerProfile,
    sink: Arc<RecordingSink>,
) -> Result<ContractHarness, String> {
    let url = Url::parse(base_url).map_err(|err| format!("bad stub url: {err}"))?;
    let client = ApiClient::new(url, Duration::from_secs(5))
        .map_err(|err| format!("client build failed: {err}"))?
        .with_audit_sink(sink);
    Ok(ContractHarness::from_client(client, profile, true))
}

/// Returns a base URL for a port nothing listens on.
pub fn dead_base_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("local addr failed: {err}"))?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
