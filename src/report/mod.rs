// src/report/mod.rs

//! Assertion reporting.
//!
//! The execution engine never decides what a failure *means*; it only feeds
//! pass/fail signals to a [`Reporter`]. Two signals matter to it:
//!
//! - a boolean ("could this command be started at all?"),
//! - an equality ("is the raw status what we expected?").
//!
//! [`TapReporter`] prints those as TAP lines. Tests usually plug in a
//! recording reporter instead (see the `runcap-test-utils` crate).

use std::fmt::Debug;

pub mod tap;

pub use tap::{Summary, TapReporter};

/// One pass/fail outcome as seen by a reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub passed: bool,
    pub description: String,
    /// Extra lines explaining a failure (e.g. got/expected).
    pub diagnostics: Vec<String>,
}

impl Assertion {
    pub fn new(passed: bool, description: impl Into<String>) -> Self {
        Self {
            passed,
            description: description.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostic(mut self, line: impl Into<String>) -> Self {
        self.diagnostics.push(line.into());
        self
    }
}

/// Sink for assertion outcomes.
///
/// Implementors only need [`Reporter::record`]; the two signal helpers are
/// provided and return whether the assertion passed.
pub trait Reporter {
    fn record(&mut self, assertion: Assertion);

    /// Free-form commentary next to the assertions. Ignored by default.
    fn diag(&mut self, _text: &str) {}

    fn report_boolean(&mut self, passed: bool, description: &str) -> bool {
        self.record(Assertion::new(passed, description));
        passed
    }

    fn report_equality<T>(&mut self, actual: &T, expected: &T, description: &str) -> bool
    where
        T: PartialEq + Debug + ?Sized,
        Self: Sized,
    {
        let passed = actual == expected;
        let mut assertion = Assertion::new(passed, description);
        if !passed {
            assertion = assertion
                .with_diagnostic(format!("         got: {actual:?}"))
                .with_diagnostic(format!("    expected: {expected:?}"));
        }
        self.record(assertion);
        passed
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, assertion: Assertion) {
        (**self).record(assertion);
    }

    fn diag(&mut self, text: &str) {
        (**self).diag(text);
    }
}
