// crates/todo-contract-harness/src/scenario.rs
// ============================================================================
// Module: Scenario Catalog Types
// Description: Named contract scenarios grouped into endpoint suites.
// Purpose: Let the runner, CLI, and live tests share one catalog.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A [`Scenario`] is a plain function over a [`ContractHarness`] plus the
//! metadata the runner needs to decide whether it applies: which profiles it
//! is pinned to and whether it reads the server's seed data.

use crate::error::HarnessResult;
use crate::harness::ContractHarness;
use crate::profile::Scope;
use crate::profile::ServerProfile;

/// Scenario body.
pub type ScenarioFn = fn(&ContractHarness) -> HarnessResult<()>;

/// Dependence on the server's pre-seeded records (`/todos/1` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRequirement {
    /// Creates everything it touches.
    None,
    /// Reads or mutates seed records under every profile.
    Always,
    /// Needs seed records only under one profile.
    Under(ServerProfile),
}

impl SeedRequirement {
    /// Returns true when seed data is needed under `profile`.
    #[must_use]
    pub fn applies(self, profile: ServerProfile) -> bool {
        match self {
            Self::None => false,
            Self::Always => true,
            Self::Under(only) => only == profile,
        }
    }
}

/// One named contract scenario.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Stable name, unique within its suite.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Profiles the scenario runs under.
    pub scope: Scope,
    /// Seed-data dependence.
    pub seed: SeedRequirement,
    /// Scenario body.
    pub run: ScenarioFn,
}

impl Scenario {
    /// Scenario that runs under every profile and needs no seed data.
    #[must_use]
    pub const fn new(name: &'static str, summary: &'static str, run: ScenarioFn) -> Self {
        Self {
            name,
            summary,
            scope: Scope::Any,
            seed: SeedRequirement::None,
            run,
        }
    }

    /// Pins the scenario to one profile.
    #[must_use]
    pub const fn only(mut self, profile: ServerProfile) -> Self {
        self.scope = Scope::Only(profile);
        self
    }

    /// Marks the scenario as reading seed data under every profile.
    #[must_use]
    pub const fn seeded(mut self) -> Self {
        self.seed = SeedRequirement::Always;
        self
    }

    /// Marks the scenario as reading seed data under one profile.
    #[must_use]
    pub const fn seeded_under(mut self, profile: ServerProfile) -> Self {
        self.seed = SeedRequirement::Under(profile);
        self
    }

    /// Returns true when the scenario needs seed data under `profile`.
    #[must_use]
    pub fn requires_seed(&self, profile: ServerProfile) -> bool {
        self.seed.applies(profile)
    }

    /// Explains why the scenario would be skipped, if it would.
    #[must_use]
    pub fn skip_reason(&self, profile: ServerProfile, seeded: bool) -> Option<String> {
        if !self.scope.admits(profile) {
            return Some(format!("pinned to the {} profile", self.scope.label()));
        }
        if !seeded && self.requires_seed(profile) {
            return Some("requires seed data".to_string());
        }
        None
    }
}

/// Scenarios for one endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct Suite {
    /// Stable suite name.
    pub name: &'static str,
    /// Endpoint paths covered.
    pub endpoint: &'static str,
    /// Scenarios in execution order.
    pub scenarios: &'static [Scenario],
}

impl Suite {
    /// Looks up a scenario by name.
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&'static Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }
}
