// crates/todo-contract-harness/src/report.rs
// ============================================================================
// Module: Run Report
// Description: Scenario outcomes, summary rendering, and run artifacts.
// Purpose: Tally a run and persist deterministic summaries and transcripts.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`RunSummary`] collects one [`ScenarioOutcome`] per catalog scenario.
//! It renders the console summary and writes `summary.json` (canonical JSON),
//! `summary.md`, and `transcript.json` into a run root.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::audit::now_millis;
use crate::client::TranscriptEntry;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::profile::ServerProfile;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every check held.
    Passed,
    /// A check failed or a request errored.
    Failed,
    /// Not applicable to this profile or server state.
    Skipped,
}

impl ScenarioStatus {
    /// Uppercase console label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }

    /// Lowercase label for audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// Recorded outcome of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Suite name.
    pub suite: String,
    /// Scenario name.
    pub scenario: String,
    /// Profile scope label.
    pub scope: &'static str,
    /// Result.
    pub status: ScenarioStatus,
    /// Error kind for failures.
    pub error_kind: Option<&'static str>,
    /// Failure or skip message.
    pub message: Option<String>,
    /// Wall-clock duration.
    pub duration_ms: u128,
}

impl ScenarioOutcome {
    /// `suite::scenario`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.suite, self.scenario)
    }
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Tally of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Server base URL.
    pub base_url: String,
    /// Selected profile.
    pub profile: ServerProfile,
    /// Whether seed-dependent scenarios were allowed.
    pub seeded: bool,
    /// Run start (milliseconds since epoch).
    pub started_at_ms: u128,
    /// Run end (milliseconds since epoch).
    pub ended_at_ms: u128,
    /// Outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Shutdown probe outcome when one was issued.
    pub shutdown: Option<String>,
}

impl RunSummary {
    /// Starts an empty summary stamped with the current time.
    #[must_use]
    pub fn new(base_url: impl Into<String>, profile: ServerProfile, seeded: bool) -> Self {
        let now = now_millis();
        Self {
            base_url: base_url.into(),
            profile,
            seeded,
            started_at_ms: now,
            ended_at_ms: now,
            outcomes: Vec::new(),
            shutdown: None,
        }
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: ScenarioOutcome) {
        self.ended_at_ms = now_millis();
        self.outcomes.push(outcome);
    }

    /// Number of outcomes with `status`.
    #[must_use]
    pub fn count(&self, status: ScenarioStatus) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.status == status).count()
    }

    /// Passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(ScenarioStatus::Passed)
    }

    /// Failed scenarios.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(ScenarioStatus::Failed)
    }

    /// Skipped scenarios.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(ScenarioStatus::Skipped)
    }

    /// Scenarios that actually ran.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.passed() + self.failed()
    }

    /// True when nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Console summary in the `Test <name>: PASSED` format.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::from("\nExecuting tests:\n\n");
        for outcome in &self.outcomes {
            let _ = write!(out, "Test {}: {}", outcome.qualified_name(), outcome.status.label());
            if let Some(message) = &outcome.message
                && outcome.status != ScenarioStatus::Passed
            {
                let _ = write!(out, " - {message}");
            }
            out.push('\n');
        }
        out.push_str("\nSummary:\n");
        let _ = writeln!(out, "Total tests run: {}", self.executed());
        let _ = writeln!(out, "Passed: {}", self.passed());
        let _ = writeln!(out, "Failed: {}", self.failed());
        let _ = writeln!(out, "Skipped: {}", self.skipped());
        if let Some(shutdown) = &self.shutdown {
            let _ = writeln!(out, "Shutdown: {shutdown}");
        }
        out
    }

    /// Markdown summary.
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# Contract Run Summary\n\n## Target\n\n");
        let _ = writeln!(out, "- Base URL: {}", self.base_url);
        let _ = writeln!(out, "- Profile: {}", self.profile);
        let _ = writeln!(out, "- Seeded: {}", self.seeded);
        let duration = self.ended_at_ms.saturating_sub(self.started_at_ms);
        let _ = writeln!(out, "- Duration (ms): {duration}");
        out.push_str("\n## Totals\n\n");
        let _ = writeln!(out, "- Passed: {}", self.passed());
        let _ = writeln!(out, "- Failed: {}", self.failed());
        let _ = writeln!(out, "- Skipped: {}", self.skipped());
        out.push_str("\n## Scenarios\n\n");
        out.push_str("| Scenario | Scope | Status | Detail |\n|---|---|---|---|\n");
        for outcome in &self.outcomes {
            let message = outcome.message.as_deref().unwrap_or("");
            let detail = message.replace('|', "\\|").replace('\n', " ");
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                outcome.qualified_name(),
                outcome.scope,
                outcome.status.as_str(),
                detail
            );
        }
        if let Some(shutdown) = &self.shutdown {
            let _ = write!(out, "\n## Shutdown\n\n- {shutdown}\n");
        }
        out
    }

    /// Writes `summary.json`, `summary.md`, and `transcript.json` under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Artifact`] when the directory or a file cannot
    /// be written.
    pub fn write_artifacts(
        &self,
        root: &Path,
        transcript: &[TranscriptEntry],
    ) -> HarnessResult<Vec<PathBuf>> {
        fs::create_dir_all(root)
            .map_err(|err| HarnessError::Artifact(format!("create {}: {err}", root.display())))?;
        Ok(vec![
            write_json(root, "summary.json", self)?,
            write_text(root, "summary.md", &self.render_markdown())?,
            write_json(root, "transcript.json", &transcript)?,
        ])
    }
}

/// Writes canonical JSON.
fn write_json<T: Serialize>(root: &Path, name: &str, value: &T) -> HarnessResult<PathBuf> {
    let bytes = serde_jcs::to_vec(value)
        .map_err(|err| HarnessError::Artifact(format!("serialize {name}: {err}")))?;
    write_bytes(root, name, &bytes)
}

/// Writes UTF-8 text.
fn write_text(root: &Path, name: &str, value: &str) -> HarnessResult<PathBuf> {
    write_bytes(root, name, value.as_bytes())
}

/// Writes raw bytes and returns the path.
fn write_bytes(root: &Path, name: &str, bytes: &[u8]) -> HarnessResult<PathBuf> {
    let path = root.join(name);
    fs::write(&path, bytes)
        .map_err(|err| HarnessError::Artifact(format!("write {}: {err}", path.display())))?;
    Ok(path)
}
