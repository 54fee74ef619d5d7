// crates/todo-contract-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for Todo Manager contract runs.
// Purpose: Provide typed access to target, profile, and artifact settings.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables. Command-line flags are applied by callers on
//! top of the loaded [`HarnessConfig`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod file;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::AuditLogTarget;
pub use env::ConfigError;
pub use env::DEFAULT_BASE_URL;
pub use env::DEFAULT_TIMEOUT;
pub use env::HarnessConfig;
pub use env::HarnessEnv;
pub use env::parse_base_url;
pub use env::read_env_strict;
pub use file::ConfigFile;
