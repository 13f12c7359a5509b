// src/exec/runner.rs

//! One complete run: launch, drain, reap.

use std::borrow::Cow;
use std::ffi::OsStr;

use tokio::io::AsyncRead;
use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::errors::{Result, RuncapError};
use crate::report::Reporter;
use crate::types::RunStatus;

use super::launcher::{Launched, launch};
use super::multiplex::drain;

/// Result record of a single run.
///
/// Buffers hold the child's bytes verbatim; use the `*_str` helpers for text
/// assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: RunStatus,
}

impl RunOutput {
    /// Empty buffers and a `NotSpawned` status.
    pub const fn empty() -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            status: RunStatus::NotSpawned,
        }
    }

    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Run `command` to completion and capture everything it wrote.
///
/// Emits exactly one boolean signal on `reporter`: whether the process could
/// be started. A spawn failure is not an error; it yields a [`RunOutput`]
/// with [`RunStatus::NotSpawned`] and empty buffers.
///
/// Errors are only returned for failures after a successful spawn (a broken
/// pipe read, or `wait` itself failing). The child is reaped in both cases.
pub async fn run<R, S>(reporter: &mut R, command: &[S]) -> Result<RunOutput>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    let description = format!("spawn {}", command_line(command));

    let Launched {
        pid,
        mut child,
        stdout,
        stderr,
    } = match launch(command).await {
        Ok(launched) => {
            reporter.report_boolean(true, &description);
            launched
        }
        Err(err) => {
            warn!(command = %command_line(command), error = %err, "could not spawn command");
            reporter.report_boolean(false, &description);
            return Ok(RunOutput::empty());
        }
    };

    collect(pid, &mut child, stdout, stderr).await
}

/// Drain both output streams of an already spawned `child`, then reap it.
///
/// `child` is waited on exactly once, also when draining fails; a read error
/// is returned only after the child has been reaped.
pub(crate) async fn collect<O, E>(
    pid: u32,
    child: &mut Child,
    stdout: O,
    stderr: E,
) -> Result<RunOutput>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    // Both pipe handles are moved into `drain` and dropped by the time it
    // returns, even on error, so the child can't stay blocked on a write
    // while we wait for it below.
    let drained = drain(stdout, stderr).await;
    if let Err(err) = &drained {
        warn!(pid, error = %err, "stream drain failed; reaping child anyway");
    }

    let exit = child.wait().await.map_err(RuncapError::Wait)?;
    let status = RunStatus::from_exit_status(exit);
    info!(pid, raw_status = status.raw(), %status, "child process reaped");

    let captured = drained?;
    debug!(
        pid,
        stdout_bytes = captured.stdout.len(),
        stderr_bytes = captured.stderr.len(),
        "run complete"
    );

    Ok(RunOutput {
        stdout: captured.stdout,
        stderr: captured.stderr,
        status,
    })
}

/// Render a command for humans: arguments joined by spaces, no quoting.
pub fn command_line<S: AsRef<OsStr>>(command: &[S]) -> String {
    command
        .iter()
        .map(|part| part.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
