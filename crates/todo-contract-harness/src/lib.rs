// crates/todo-contract-harness/src/lib.rs
// ============================================================================
// Module: Todo Contract Harness
// Description: Black-box contract tests for the Todo Manager REST API.
// Purpose: Provide the fixture-backed harness, scenario catalog, and runner.
// Dependencies: reqwest, serde, serde_json, jsonschema, thiserror, toml, url
// ============================================================================

//! ## Overview
//! The harness owns no server logic. It sends one blocking request at a time
//! to an externally hosted Todo Manager, creates and deletes its own fixtures,
//! and checks status codes, headers, and JSON bodies. Contradictory
//! expectations are kept as separate scenarios pinned to a
//! [`ServerProfile`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;
pub mod config;
pub mod error;
pub mod expectation;
pub mod harness;
pub mod model;
pub mod profile;
pub mod report;
pub mod response;
pub mod runner;
pub mod scenario;
pub mod schemas;
pub mod suites;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiClient;
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use error::HarnessResult;
pub use expectation::ContractCheck;
pub use expectation::Expectation;
pub use harness::ContractHarness;
pub use harness::FixtureGuard;
pub use harness::ShutdownOutcome;
pub use model::FixtureId;
pub use model::FixtureKind;
pub use profile::Scope;
pub use profile::ServerProfile;
pub use report::RunSummary;
pub use report::ScenarioOutcome;
pub use report::ScenarioStatus;
pub use runner::RunOptions;
pub use runner::run_scenario;
pub use runner::run_suites;
pub use scenario::Scenario;
pub use scenario::Suite;
pub use suites::catalog;
