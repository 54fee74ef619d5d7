// crates/todo-contract-harness/src/profile.rs
// ============================================================================
// Module: Server Profiles
// Description: Named expectation sets pinned to a Todo Manager server build.
// Purpose: Keep contradictory expectations as separate, labeled scenarios.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Some endpoints have two incompatible expectations (for example `OPTIONS
//! /todos` answering 200 versus 405). Rather than pick one, each variant is
//! pinned to a [`ServerProfile`] and only runs when that profile is selected.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Expectation set a run is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerProfile {
    /// Behavior as documented: unsupported methods answer 405, relation
    /// collections are bare arrays, HEAD carries `Content-Length`.
    Documented,
    /// Behavior of the reference server build: OPTIONS answers 200, lists are
    /// enveloped by collection name, HEAD responses are chunked.
    #[default]
    Observed,
}

impl ServerProfile {
    /// Every profile, in display order.
    pub const ALL: [Self; 2] = [Self::Documented, Self::Observed];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Documented => "documented",
            Self::Observed => "observed",
        }
    }
}

impl fmt::Display for ServerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!("unknown server profile `{trimmed}` (expected documented or observed)")
            })
    }
}

/// Which profiles a scenario applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Runs under every profile.
    Any,
    /// Runs only when the given profile is selected.
    Only(ServerProfile),
}

impl Scope {
    /// Returns true when the scope admits `profile`.
    #[must_use]
    pub fn admits(self, profile: ServerProfile) -> bool {
        match self {
            Self::Any => true,
            Self::Only(only) => only == profile,
        }
    }

    /// Returns a short label for listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Only(profile) => profile.as_str(),
        }
    }
}
