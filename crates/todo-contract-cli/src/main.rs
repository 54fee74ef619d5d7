// crates/todo-contract-cli/src/main.rs
// ============================================================================
// Module: Todo Contract CLI Entry Point
// Description: Command dispatcher for Todo Manager contract runs.
// Purpose: Probe, run, list, and shut down from the command line.
// Dependencies: clap, serde_jcs, thiserror, todo-contract-harness
// ============================================================================

//! ## Overview
//! `todo-contract run` performs the pre-flight probe, runs the selected
//! suites in catalog order, prints the summary, and optionally asks the
//! server to shut down. Exit codes: `0` nothing failed, `1` at least one
//! scenario failed, `2` configuration, pre-flight, or output errors.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use todo_contract_harness::ContractHarness;
use todo_contract_harness::HarnessConfig;
use todo_contract_harness::RunOptions;
use todo_contract_harness::RunSummary;
use todo_contract_harness::Scope;
use todo_contract_harness::ServerProfile;
use todo_contract_harness::catalog;
use todo_contract_harness::config::parse_base_url;
use todo_contract_harness::run_suites;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code when at least one scenario failed.
const EXIT_SCENARIO_FAILED: u8 = 1;
/// Exit code for configuration, pre-flight, and output errors.
const EXIT_ERROR: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "todo-contract", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run contract suites against a live server.
    Run(RunCommand),
    /// List suites and scenarios.
    List(ListCommand),
    /// Check that the server answers `GET /` with 200.
    Probe(TargetArgs),
    /// Ask a running server to stop via `GET /shutdown`.
    Shutdown(TargetArgs),
}

/// Target selection shared by every networked command.
#[derive(Args, Debug, Clone, Default)]
struct TargetArgs {
    /// Optional TOML config file (overrides `TODO_CONTRACT_CONFIG`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Server base URL.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_sec: Option<u64>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Target selection.
    #[command(flatten)]
    target: TargetArgs,
    /// Suite to run; repeat for several. Runs every suite when omitted.
    #[arg(long = "suite", value_name = "NAME")]
    suites: Vec<String>,
    /// Expectation profile.
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,
    /// Skip scenarios that depend on the server's seed data.
    #[arg(long)]
    unseeded: bool,
    /// Issue the shutdown probe after the last scenario.
    #[arg(long)]
    shutdown: bool,
    /// Directory for `summary.json`, `summary.md`, and `transcript.json`.
    #[arg(long, value_name = "DIR")]
    run_root: Option<PathBuf>,
    /// Summary output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Only list scenarios that run under this profile.
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,
}

/// Profile selector.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ProfileArg {
    /// Behavior as documented.
    Documented,
    /// Behavior of the reference server build.
    Observed,
}

impl From<ProfileArg> for ServerProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Documented => Self::Documented,
            ProfileArg::Observed => Self::Observed,
        }
    }
}

/// Output formats for run summaries.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Console summary.
    Text,
    /// Canonical JSON summary.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a printable message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::List(command) => command_list(&command),
        Commands::Probe(target) => command_probe(&target),
        Commands::Shutdown(target) => command_shutdown(&target),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let mut config = load_config(&command.target)?;
    apply_run_overrides(&mut config, command);
    let harness = build_harness(&config)?;
    let options = RunOptions {
        suites: command.suites.clone(),
        shutdown_after: config.shutdown_after_run,
    };
    let summary = run_suites(&harness, catalog(), &options)
        .map_err(|err| CliError::new(format!("run aborted: {err}")))?;

    if let Some(root) = &config.run_root {
        summary
            .write_artifacts(root, &harness.client().transcript())
            .map_err(|err| CliError::new(err.to_string()))?;
    }
    match command.format {
        OutputFormat::Text => write_stdout(&summary.render_text())?,
        OutputFormat::Json => write_stdout_line(&render_json(&summary)?)?,
    }
    Ok(exit_code_for(&summary))
}

/// Executes the `list` command.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let profile = command.profile.map(ServerProfile::from);
    for suite in catalog() {
        write_stdout_line(&format!("{} ({})", suite.name, suite.endpoint))?;
        for scenario in suite.scenarios {
            if profile.is_some_and(|profile| !scenario.scope.admits(profile)) {
                continue;
            }
            let seed = match profile {
                Some(profile) if scenario.requires_seed(profile) => " [seeded]",
                _ => "",
            };
            let scope = match scenario.scope {
                Scope::Any => String::new(),
                Scope::Only(only) => format!(" [{only}]"),
            };
            write_stdout_line(&format!("  {}{scope}{seed} - {}", scenario.name, scenario.summary))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `probe` command.
fn command_probe(target: &TargetArgs) -> CliResult<ExitCode> {
    let config = load_config(target)?;
    let harness = build_harness(&config)?;
    harness.ensure_system_ready().map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("ready: {}", config.base_url))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `shutdown` command.
fn command_shutdown(target: &TargetArgs) -> CliResult<ExitCode> {
    let config = load_config(target)?;
    let harness = build_harness(&config)?;
    let outcome = harness.shutdown_probe();
    write_stdout_line(&format!("shutdown: {outcome}"))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads file and environment configuration, then applies target flags.
fn load_config(target: &TargetArgs) -> CliResult<HarnessConfig> {
    let mut config = HarnessConfig::load_from(target.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    apply_target_overrides(&mut config, target)?;
    Ok(config)
}

/// Applies `--base-url` and `--timeout-sec`.
fn apply_target_overrides(config: &mut HarnessConfig, target: &TargetArgs) -> CliResult<()> {
    if let Some(raw) = &target.base_url {
        config.base_url =
            parse_base_url("--base-url", raw).map_err(|err| CliError::new(err.to_string()))?;
    }
    if let Some(secs) = target.timeout_sec {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(())
}

/// Applies the `run`-only flags.
fn apply_run_overrides(config: &mut HarnessConfig, command: &RunCommand) {
    if let Some(profile) = command.profile {
        config.profile = profile.into();
    }
    if command.unseeded {
        config.seeded = false;
    }
    if command.shutdown {
        config.shutdown_after_run = true;
    }
    if let Some(root) = &command.run_root {
        config.run_root = Some(root.clone());
    }
}

/// Builds the harness for `config`.
fn build_harness(config: &HarnessConfig) -> CliResult<ContractHarness> {
    ContractHarness::new(config).map_err(|err| CliError::new(err.to_string()))
}

/// Renders the summary as canonical JSON.
fn render_json(summary: &RunSummary) -> CliResult<String> {
    serde_jcs::to_string(summary)
        .map_err(|err| CliError::new(format!("failed to render summary: {err}")))
}

/// Maps a finished run to its exit code.
fn exit_code_for(summary: &RunSummary) -> ExitCode {
    if summary.is_success() { ExitCode::SUCCESS } else { ExitCode::from(EXIT_SCENARIO_FAILED) }
}

/// Writes text to stdout without a trailing newline.
fn write_stdout(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes()).map_err(|err| output_error("stdout", &err))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| output_error("stdout", &err))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write to {stream}: {error}"))
}

/// Emits an error message to stderr and returns the error exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_ERROR)
}
