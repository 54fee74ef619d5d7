// system-tests/src/lib.rs
// ============================================================================
// Module: Todo Contract System Tests Library
// Description: Shared target configuration for live contract binaries.
// Purpose: Load one harness configuration and build harnesses from it.
// Dependencies: todo-contract-harness
// ============================================================================

//! ## Overview
//! Live binaries in `system-tests/tests` talk to a server the operator has
//! already started. The target comes from the same `TODO_CONTRACT_*`
//! variables and optional TOML file the CLI reads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use todo_contract_harness::ContractHarness;
use todo_contract_harness::HarnessConfig;

// ============================================================================
// SECTION: Target
// ============================================================================

/// Loads the live target configuration.
///
/// # Errors
///
/// Returns the configuration error message.
pub fn load_target() -> Result<HarnessConfig, String> {
    HarnessConfig::load().map_err(|err| err.to_string())
}

/// Builds a harness for the live target.
///
/// # Errors
///
/// Returns an error when configuration or client construction fails.
pub fn live_harness(config: &HarnessConfig) -> Result<ContractHarness, String> {
    ContractHarness::new(config).map_err(|err| err.to_string())
}

/// Artifact directory for `test_name`: under the configured run root when
/// set, otherwise `target/system-tests/run_<millis>/<test_name>`.
#[must_use]
pub fn artifact_root(config: &HarnessConfig, test_name: &str) -> PathBuf {
    config.run_root.as_ref().map_or_else(
        || {
            let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
            let stamp = elapsed.as_millis();
            PathBuf::from("target/system-tests").join(format!("run_{stamp}")).join(test_name)
        },
        |root| root.join(test_name),
    )
}
