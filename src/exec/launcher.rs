// src/exec/launcher.rs

//! Child process creation.

use std::ffi::OsStr;
use std::process::Stdio;

use anyhow::anyhow;
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::errors::{Result, RuncapError};

/// A freshly spawned child and the parent's ends of its output pipes.
#[derive(Debug)]
pub struct Launched {
    pub pid: u32,
    pub child: Child,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Spawn `command[0]` with `command[1..]` as literal arguments.
///
/// All three standard streams are piped. The parent's write end of stdin is
/// dropped before returning, so a child that reads stdin sees EOF instead of
/// blocking forever.
pub async fn launch<S: AsRef<OsStr>>(command: &[S]) -> Result<Launched> {
    let (program, args) = command.split_first().ok_or(RuncapError::EmptyCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let pid = child.id().unwrap_or_default();

    // Nothing is ever written to the child; close our end immediately.
    drop(child.stdin.take());
    debug!(pid, "closed child stdin");

    let (stdout, stderr) = take_output_pipes(&mut child).await?;

    info!(
        pid,
        program = %program.as_ref().to_string_lossy(),
        argc = args.len(),
        "spawned child process"
    );

    Ok(Launched {
        pid,
        child,
        stdout,
        stderr,
    })
}

/// Take both output pipes from `child`.
///
/// If either is missing (only possible when the command was not configured
/// with piped stdout/stderr) the child is killed and reaped before the error
/// is returned, so no process outlives a failed launch.
async fn take_output_pipes(child: &mut Child) -> Result<(ChildStdout, ChildStderr)> {
    if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
        return Ok((stdout, stderr));
    }

    warn!(pid = child.id(), "child output pipes were not captured; killing it");
    if let Err(err) = child.kill().await {
        warn!(error = %err, "could not kill child without pipes");
    }
    Err(anyhow!("child stdout/stderr pipes were not captured").into())
}
