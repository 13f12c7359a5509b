// tests/exit_status.rs
mod common;
use crate::common::{RecordingReporter, TestResult, init_tracing, sh, with_timeout};

use std::io::Write;

use runcap::exec::run;
use runcap::types::{RunStatus, SPAWN_FAILED};

#[tokio::test]
async fn signal_termination_decodes_the_signal() -> TestResult {
    init_tracing();

    for (name, number) in [("TERM", 15), ("KILL", 9), ("HUP", 1)] {
        let mut reporter = RecordingReporter::new();
        let out = with_timeout(run(&mut reporter, &sh(&format!("echo bye; kill -{name} $$")))).await?;

        assert!(out.status.is_spawned());
        assert_ne!(out.status.raw(), SPAWN_FAILED);
        assert_eq!(out.status.signal(), Some(number), "SIG{name}");
        assert_eq!(out.status.exit_code(), None);
        assert!(!out.status.success());
        assert_eq!(out.stdout_str(), "bye\n");
        assert_eq!(reporter.verdicts(), [true]);
    }

    Ok(())
}

#[tokio::test]
async fn missing_executable_reports_spawn_failure() -> TestResult {
    init_tracing();

    let mut reporter = RecordingReporter::new();
    let out = with_timeout(run(
        &mut reporter,
        &["/nonexistent/runcap-definitely-missing", "--flag"],
    ))
    .await?;

    assert_eq!(out.status, RunStatus::NotSpawned);
    assert_eq!(out.status.raw(), SPAWN_FAILED);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.is_empty());

    let assertions = reporter.assertions();
    assert_eq!(assertions.len(), 1);
    assert!(!assertions[0].passed);
    assert_eq!(
        assertions[0].description,
        "spawn /nonexistent/runcap-definitely-missing --flag"
    );

    Ok(())
}

#[tokio::test]
async fn program_not_on_path_reports_spawn_failure() -> TestResult {
    init_tracing();

    let mut reporter = RecordingReporter::new();
    let out = with_timeout(run(&mut reporter, &["runcap-no-such-program-on-path"])).await?;

    assert_eq!(out.status, RunStatus::NotSpawned);
    assert_eq!(reporter.verdicts(), [false]);

    Ok(())
}

#[tokio::test]
async fn non_executable_file_reports_spawn_failure() -> TestResult {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "#!/bin/sh\necho should not run")?;
    // Freshly created temp files are not executable.

    let mut reporter = RecordingReporter::new();
    let out = with_timeout(run(&mut reporter, &[file.path()])).await?;

    assert_eq!(out.status, RunStatus::NotSpawned);
    assert!(out.stdout.is_empty());
    assert_eq!(reporter.verdicts(), [false]);

    Ok(())
}

#[tokio::test]
async fn empty_command_is_a_spawn_failure() -> TestResult {
    init_tracing();

    let mut reporter = RecordingReporter::new();
    let empty: [&str; 0] = [];
    let out = with_timeout(run(&mut reporter, &empty)).await?;

    assert_eq!(out.status, RunStatus::NotSpawned);
    assert_eq!(reporter.verdicts(), [false]);

    Ok(())
}

#[tokio::test]
async fn nonzero_exit_is_not_a_spawn_failure() -> TestResult {
    init_tracing();

    let mut reporter = RecordingReporter::new();
    let out = with_timeout(run(&mut reporter, &["false"])).await?;

    assert_eq!(out.status.exit_code(), Some(1));
    assert_eq!(out.status.raw(), 1 << 8);
    // Only the spawn signal; `run` itself asserts nothing about the status.
    assert_eq!(reporter.verdicts(), [true]);

    Ok(())
}
