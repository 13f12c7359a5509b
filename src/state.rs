// src/state.rs

//! The process-wide "last run" slot.
//!
//! Only the synchronous facade in [`crate::blocking`] writes here. The slot is
//! reset before every run and overwritten when it finishes, so reading it
//! always describes the most recent run and never leaks output from an older
//! one. Overlapping runs from several threads are not supported: the last
//! writer wins.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::exec::RunOutput;
use crate::types::RunStatus;

static LAST_RUN: Mutex<RunOutput> = Mutex::new(RunOutput::empty());

fn slot() -> MutexGuard<'static, RunOutput> {
    // A panic while holding the lock can't leave a half-written record worth
    // protecting; keep serving reads.
    LAST_RUN.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clear all three fields: empty buffers, `NotSpawned`.
pub fn reset() {
    *slot() = RunOutput::empty();
}

/// Replace the slot with a finished run.
pub fn store(output: RunOutput) {
    *slot() = output;
}

/// Captured stdout of the last run, lossily decoded as UTF-8.
pub fn stdout() -> String {
    slot().stdout_str().into_owned()
}

/// Captured stderr of the last run, lossily decoded as UTF-8.
pub fn stderr() -> String {
    slot().stderr_str().into_owned()
}

pub fn stdout_bytes() -> Vec<u8> {
    slot().stdout.clone()
}

pub fn stderr_bytes() -> Vec<u8> {
    slot().stderr.clone()
}

/// Status of the last run.
pub fn status() -> RunStatus {
    slot().status
}

/// Copy of the whole record.
pub fn snapshot() -> RunOutput {
    slot().clone()
}
