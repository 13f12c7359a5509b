// src/blocking.rs

//! Synchronous facade over the async engine.
//!
//! Each call drives one run to completion on a private current-thread Tokio
//! runtime and records the result in the global slot ([`crate::state`]).
//! These functions block the calling thread and panic if called from inside
//! an async runtime; async code should use [`crate::exec`] directly.

use std::ffi::OsStr;
use std::future::Future;

use crate::errors::Result;
use crate::exec::{self, RunOutput};
use crate::report::Reporter;
use crate::state;
use crate::types::RunStatus;

/// Run `command`, store the result in the global slot and return its status.
///
/// The slot is reset before the command is launched, so a run that fails to
/// spawn leaves empty buffers and `NotSpawned` behind.
pub fn run<R, S>(reporter: &mut R, command: &[S]) -> Result<RunStatus>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    state::reset();
    let output = block_on(exec::run(reporter, command))??;
    Ok(record(output))
}

/// Blocking [`exec::run_ok`]: returns whether the exit status matched.
pub fn run_ok<R, S>(reporter: &mut R, args: &[S]) -> Result<bool>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    state::reset();
    let outcome = block_on(exec::run_ok(reporter, args))??;
    record(outcome.output);
    Ok(outcome.passed)
}

/// Blocking [`exec::run_ok_with`].
pub fn run_ok_with<R, S>(reporter: &mut R, expected: u8, command: &[S]) -> Result<bool>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    state::reset();
    let outcome = block_on(exec::run_ok_with(reporter, expected, command))??;
    record(outcome.output);
    Ok(outcome.passed)
}

fn record(output: RunOutput) -> RunStatus {
    let status = output.status;
    state::store(output);
    status
}

fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(fut))
}
