// crates/todo-contract-harness/src/suites/root.rs
// ============================================================================
// Module: Root Suite
// Description: Liveness contract for `/`.
// Purpose: Confirm the server answers before anything else runs.
// Dependencies: crate::harness
// ============================================================================

use crate::error::HarnessResult;
use crate::harness::ContractHarness;
use crate::scenario::Scenario;
use crate::scenario::Suite;

/// `/` scenarios.
pub const SUITE: Suite = Suite {
    name: "root",
    endpoint: "/",
    scenarios: &[Scenario::new("get_root_is_ready", "GET / answers 200", get_root_is_ready)],
};

fn get_root_is_ready(harness: &ContractHarness) -> HarnessResult<()> {
    harness.ensure_system_ready()
}
