// system-tests/tests/helpers/live.rs
// ============================================================================
// Module: Live Scenario Runner
// Description: Runs one catalog scenario against the configured server.
// Purpose: Give every scenario its own #[test] with artifacts.
// Dependencies: system-tests, todo-contract-harness
// ============================================================================

use std::error::Error;
use std::sync::Mutex;

use system_tests::artifact_root;
use system_tests::live_harness;
use system_tests::load_target;
use todo_contract_harness::RunSummary;
use todo_contract_harness::ScenarioStatus;
use todo_contract_harness::run_scenario;
use todo_contract_harness::suites::find_scenario;

/// Serializes scenarios within one binary; seeded checks assume nobody else
/// is mutating the server.
static SERVER_LOCK: Mutex<()> = Mutex::new(());

/// Runs `suite::scenario` and writes a one-outcome `summary.json`,
/// `summary.md`, and `transcript.json` for it. Out-of-profile and unseeded
/// skips pass.
pub fn run_live(suite: &str, scenario: &str) -> Result<(), Box<dyn Error>> {
    let _serial = SERVER_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let config = load_target()?;
    let entry =
        find_scenario(suite, scenario).ok_or_else(|| format!("no scenario {suite}::{scenario}"))?;

    let harness = live_harness(&config)?;
    harness.ensure_system_ready()?;
    let mut summary =
        RunSummary::new(config.base_url.as_str(), harness.profile(), harness.seeded());
    summary.push(run_scenario(&harness, suite, entry));
    let root = artifact_root(&config, &format!("{suite}__{scenario}"));
    summary.write_artifacts(&root, &harness.client().transcript())?;

    match summary.outcomes.pop() {
        Some(outcome) if outcome.status == ScenarioStatus::Failed => {
            Err(outcome.message.unwrap_or_else(|| "scenario failed".to_string()).into())
        }
        _ => Ok(()),
    }
}

/// Declares one `#[test]` per scenario of a suite.
macro_rules! live_scenarios {
    ($suite:literal => $($scenario:ident),+ $(,)?) => {
        $(
            #[test]
            fn $scenario() -> Result<(), Box<dyn std::error::Error>> {
                $crate::helpers::live::run_live($suite, stringify!($scenario))
            }
        )+
    };
}

pub(crate) use live_scenarios;
