// src/lib.rs

//! Launch external processes, capture stdout and stderr separately, and
//! assert on their termination status.
//!
//! - [`exec`] is the engine: async, stateless, one [`exec::RunOutput`] per run.
//! - [`blocking`] + [`state`] offer the synchronous "run, then read the last
//!   result" style on top of it.
//! - [`report`] defines where pass/fail signals go.
//! - [`config`] + [`suite`] run checks described in a TOML file.

pub mod blocking;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod state;
pub mod suite;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{SuiteFile, default_config_path, load_and_validate};
use crate::exec::command_line;
use crate::report::{Reporter, TapReporter};
use crate::suite::run_suite;

pub use crate::exec::{RunOutput, run, run_ok, run_ok_with};
pub use crate::types::{RunStatus, SPAWN_FAILED, StreamTag};

/// High-level entry point used by `main.rs`.
///
/// Runs either the trailing command (as `run_ok`) or the check suite, prints
/// TAP to stdout and returns whether every assertion passed.
pub async fn run_cli(args: CliArgs) -> Result<bool> {
    if args.command.is_empty() {
        run_suite_file(&args).await
    } else {
        run_single(&args).await
    }
}

async fn run_single(args: &CliArgs) -> Result<bool> {
    let (expected, command) = exec::split_expected_exit(&args.command);

    if args.dry_run {
        println!("runcap dry-run");
        println!("  cmd: {}", command_line(command));
        println!("  expected exit: {expected}");
        return Ok(true);
    }

    let mut tap = TapReporter::stdout();
    let result = run_ok_with(&mut tap, expected, command).await?;
    if args.show_output {
        tap.diag("stdout:");
        tap.diag(&result.output.stdout_str());
        tap.diag("stderr:");
        tap.diag(&result.output.stderr_str());
    }

    let (_, summary) = tap.finish().context("writing TAP output")?;
    info!(passed = summary.passed, failed = summary.failed, "command checked");
    Ok(summary.all_passed())
}

async fn run_suite_file(args: &CliArgs) -> Result<bool> {
    let path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let suite = load_and_validate(&path)
        .with_context(|| format!("loading check suite from {}", path.display()))?;

    if args.dry_run {
        print_dry_run(&suite);
        return Ok(true);
    }

    let mut tap = TapReporter::stdout();
    let outcome = run_suite(&mut tap, &suite, args.show_output).await?;
    let (_, summary) = tap.finish().context("writing TAP output")?;

    info!(
        checks_run = outcome.checks_run,
        checks_failed = outcome.checks_failed,
        stopped_early = outcome.stopped_early,
        assertions_passed = summary.passed,
        assertions_failed = summary.failed,
        "suite finished"
    );
    Ok(outcome.all_passed() && summary.all_passed())
}

/// Print checks, commands and expectations without running anything.
fn print_dry_run(suite: &SuiteFile) {
    println!("runcap dry-run");
    println!("  config.fail_fast = {}", suite.config.fail_fast);
    println!();

    println!("checks ({}):", suite.checks.len());
    for check in &suite.checks {
        println!("  - {}", check.name);
        println!("      cmd: {:?}", check.cmd);
        println!("      exit: {}", check.exit);
        if let Some(ref s) = check.stdout {
            println!("      stdout: {s:?}");
        }
        if let Some(ref s) = check.stderr {
            println!("      stderr: {s:?}");
        }
        if let Some(ref re) = check.stdout_matches {
            println!("      stdout_matches: {}", re.as_str());
        }
        if let Some(ref re) = check.stderr_matches {
            println!("      stderr_matches: {}", re.as_str());
        }
        println!("      assertions: {}", check.assertion_count());
    }

    debug!("dry-run complete (no execution)");
}
