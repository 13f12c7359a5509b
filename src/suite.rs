// src/suite.rs

//! Runs a validated check suite against a reporter.

use tracing::{debug, info};

use crate::config::{Check, SuiteFile};
use crate::errors::Result;
use crate::exec::{RunOutput, run_ok_with};
use crate::report::Reporter;

/// What happened while running a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuiteOutcome {
    pub checks_run: usize,
    pub checks_failed: usize,
    /// `fail_fast` cut the suite short.
    pub stopped_early: bool,
}

impl SuiteOutcome {
    pub fn all_passed(&self) -> bool {
        self.checks_failed == 0
    }
}

/// Run every check in order.
///
/// With `show_output`, each check's captured stdout and stderr are passed to
/// [`Reporter::diag`] after its assertions.
pub async fn run_suite<R: Reporter>(
    reporter: &mut R,
    suite: &SuiteFile,
    show_output: bool,
) -> Result<SuiteOutcome> {
    let mut outcome = SuiteOutcome::default();

    for (idx, check) in suite.checks.iter().enumerate() {
        info!(check = %check.name, cmd = ?check.cmd, expected_exit = check.exit, "running check");

        let passed = run_check(reporter, check, show_output).await?;
        outcome.checks_run += 1;
        if !passed {
            outcome.checks_failed += 1;
        }
        debug!(check = %check.name, passed, "check finished");

        let remaining = suite.checks.len() - idx - 1;
        if !passed && suite.config.fail_fast && remaining > 0 {
            info!(check = %check.name, remaining, "fail_fast set; skipping remaining checks");
            outcome.stopped_early = true;
            break;
        }
    }

    Ok(outcome)
}

async fn run_check<R: Reporter>(reporter: &mut R, check: &Check, show_output: bool) -> Result<bool> {
    let result = run_ok_with(reporter, check.exit, &check.cmd).await?;
    let mut passed = result.passed;

    passed &= assert_streams(reporter, check, &result.output);

    if show_output {
        reporter.diag(&format!("{} stdout:", check.name));
        reporter.diag(&result.output.stdout_str());
        reporter.diag(&format!("{} stderr:", check.name));
        reporter.diag(&result.output.stderr_str());
    }

    Ok(passed)
}

fn assert_streams<R: Reporter>(reporter: &mut R, check: &Check, output: &RunOutput) -> bool {
    let stdout = output.stdout_str();
    let stderr = output.stderr_str();
    let mut passed = true;

    if let Some(expected) = &check.stdout {
        let desc = format!("{}: stdout is as expected", check.name);
        passed &= reporter.report_equality::<str>(&stdout, expected, &desc);
    }
    if let Some(expected) = &check.stderr {
        let desc = format!("{}: stderr is as expected", check.name);
        passed &= reporter.report_equality::<str>(&stderr, expected, &desc);
    }
    if let Some(re) = &check.stdout_matches {
        let desc = format!("{}: stdout matches /{}/", check.name, re.as_str());
        passed &= reporter.report_boolean(re.is_match(&stdout), &desc);
    }
    if let Some(re) = &check.stderr_matches {
        let desc = format!("{}: stderr matches /{}/", check.name, re.as_str());
        passed &= reporter.report_boolean(re.is_match(&stderr), &desc);
    }

    passed
}
