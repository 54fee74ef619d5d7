// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for live Todo Manager contract tests.
// Purpose: Provide the per-scenario live runner.
// Dependencies: system-tests, todo-contract-harness
// ============================================================================

//! ## Overview
//! Every binary runs against a server started outside the test process.
//! Select it with `TODO_CONTRACT_BASE_URL` and the profile with
//! `TODO_CONTRACT_PROFILE`.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod live;
