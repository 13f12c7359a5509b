// src/exec/expect.rs

//! `run_ok`: run a command and assert on its exit code in one call.

use std::ffi::OsStr;

use crate::errors::Result;
use crate::report::Reporter;
use crate::types::encode_exit_code;

use super::runner::{RunOutput, command_line, run};

/// Outcome of [`run_ok`] / [`run_ok_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOk {
    pub output: RunOutput,
    pub expected_exit: u8,
    /// Whether the status assertion passed.
    pub passed: bool,
}

/// Split an optional leading expected exit code off an argument list.
///
/// The first argument is consumed when it is a whole number in `0..=255`
/// written as plain digits, optionally followed by a zero-only fraction
/// (`"2"`, `"002"`, `"2.0"`). Anything else, including `"256"`, `"-1"` and
/// `"2.5"`, is left in place and the expected code defaults to 0.
pub fn split_expected_exit<S: AsRef<OsStr>>(args: &[S]) -> (u8, &[S]) {
    match args.split_first() {
        Some((first, rest)) => match parse_exit_code(first.as_ref()) {
            Some(code) => (code, rest),
            None => (0, args),
        },
        None => (0, args),
    }
}

fn parse_exit_code(arg: &OsStr) -> Option<u8> {
    let s = arg.to_str()?;
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            return None;
        }
    }

    let trimmed = whole.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some(0);
    }
    // Longer than "255" can't fit; avoids overflow on absurd inputs.
    if trimmed.len() > 3 {
        return None;
    }
    trimmed.parse::<u16>().ok().and_then(|n| u8::try_from(n).ok())
}

/// Run `args` and assert it exits with the expected code.
///
/// A leading numeric argument is taken as the expected exit code (see
/// [`split_expected_exit`]); without one, 0 is expected. Produces exactly two
/// reporter signals: the spawn signal from [`run`] and the status equality.
pub async fn run_ok<R, S>(reporter: &mut R, args: &[S]) -> Result<RunOk>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    let (expected, command) = split_expected_exit(args);
    run_ok_with(reporter, expected, command).await
}

/// Like [`run_ok`] with an explicit expected exit code and no argument
/// parsing.
pub async fn run_ok_with<R, S>(reporter: &mut R, expected: u8, command: &[S]) -> Result<RunOk>
where
    R: Reporter,
    S: AsRef<OsStr>,
{
    let output = run(reporter, command).await?;

    let expected_raw = encode_exit_code(expected);
    let description = format!("exit status is {expected}: {}", command_line(command));
    let passed = reporter.report_equality(&output.status.raw(), &expected_raw, &description);

    Ok(RunOk {
        output,
        expected_exit: expected,
        passed,
    })
}
