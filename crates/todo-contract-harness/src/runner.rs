// crates/todo-contract-harness/src/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential execution of catalog suites against one server.
// Purpose: Pre-flight, run applicable scenarios, tally, optionally shut down.
// Dependencies: crate::harness, crate::report
// ============================================================================

//! ## Overview
//! Runs are strictly sequential. An unreachable server aborts before any
//! scenario executes; every other failure is confined to its scenario.

use std::time::Instant;

use crate::audit::ScenarioAuditEvent;
use crate::audit::now_millis;
use crate::config::ConfigError;
use crate::error::HarnessResult;
use crate::harness::ContractHarness;
use crate::report::RunSummary;
use crate::report::ScenarioOutcome;
use crate::report::ScenarioStatus;
use crate::scenario::Scenario;
use crate::scenario::Suite;

/// Run selection and post-run behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Suite names to run; empty runs every suite.
    pub suites: Vec<String>,
    /// Issue the shutdown probe after the last scenario.
    pub shutdown_after: bool,
}

/// Filters `catalog` down to the named suites, keeping catalog order.
///
/// # Errors
///
/// Returns a configuration error naming the first unknown suite.
pub fn select_suites<'a>(
    catalog: &'a [Suite],
    names: &[String],
) -> HarnessResult<Vec<&'a Suite>> {
    let is_known = |name: &str| catalog.iter().any(|suite| suite.name == name);
    if let Some(unknown) = names.iter().find(|name| !is_known(name.as_str())) {
        let known: Vec<&str> = catalog.iter().map(|suite| suite.name).collect();
        let message = format!("unknown suite `{unknown}` (known: {})", known.join(", "));
        return Err(ConfigError::Invalid(message).into());
    }
    let wanted = |suite: &&Suite| names.is_empty() || names.iter().any(|name| name == suite.name);
    Ok(catalog.iter().filter(wanted).collect())
}

/// Runs the selected suites.
///
/// # Errors
///
/// Returns [`crate::HarnessError::Unreachable`] when the pre-flight probe
/// fails and a configuration error for unknown suite names. Scenario
/// failures are recorded in the summary, not returned.
pub fn run_suites(
    harness: &ContractHarness,
    catalog: &[Suite],
    options: &RunOptions,
) -> HarnessResult<RunSummary> {
    let selected = select_suites(catalog, &options.suites)?;
    harness.ensure_system_ready()?;

    let mut summary =
        RunSummary::new(harness.client().base_url().as_str(), harness.profile(), harness.seeded());
    for suite in selected {
        for scenario in suite.scenarios {
            summary.push(run_scenario(harness, suite.name, scenario));
        }
    }
    if options.shutdown_after {
        summary.shutdown = Some(harness.shutdown_probe().to_string());
    }
    Ok(summary)
}

/// Runs one scenario (or skips it) and emits its audit event.
pub fn run_scenario(
    harness: &ContractHarness,
    suite: &str,
    scenario: &Scenario,
) -> ScenarioOutcome {
    let started = Instant::now();
    let skip = scenario.skip_reason(harness.profile(), harness.seeded());
    let (status, error_kind, message) = match skip {
        Some(reason) => (ScenarioStatus::Skipped, None, Some(reason)),
        None => match (scenario.run)(harness) {
            Ok(()) => (ScenarioStatus::Passed, None, None),
            Err(err) => (ScenarioStatus::Failed, Some(err.kind()), Some(err.to_string())),
        },
    };
    let outcome = ScenarioOutcome {
        suite: suite.to_string(),
        scenario: scenario.name.to_string(),
        scope: scenario.scope.label(),
        status,
        error_kind,
        message,
        duration_ms: started.elapsed().as_millis(),
    };
    harness.audit().record_scenario(&ScenarioAuditEvent {
        event: "scenario_result",
        timestamp_ms: now_millis(),
        suite: outcome.suite.clone(),
        scenario: outcome.scenario.clone(),
        profile: harness.profile().as_str(),
        status: outcome.status.as_str(),
        error_kind: outcome.error_kind,
        message: outcome.message.clone(),
        duration_ms: outcome.duration_ms,
    });
    outcome
}
