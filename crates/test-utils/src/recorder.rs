use std::sync::{Arc, Mutex};

use runcap::report::{Assertion, Reporter};

/// A reporter that just remembers every assertion and diagnostic.
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    assertions: Arc<Mutex<Vec<Assertion>>>,
    diags: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assertions(&self) -> Vec<Assertion> {
        self.assertions.lock().unwrap().clone()
    }

    /// Pass/fail flags in recording order.
    pub fn verdicts(&self) -> Vec<bool> {
        self.assertions().iter().map(|a| a.passed).collect()
    }

    pub fn failures(&self) -> Vec<Assertion> {
        self.assertions().into_iter().filter(|a| !a.passed).collect()
    }

    pub fn diags(&self) -> Vec<String> {
        self.diags.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.assertions.lock().unwrap().clear();
        self.diags.lock().unwrap().clear();
    }
}

impl Reporter for RecordingReporter {
    fn record(&mut self, assertion: Assertion) {
        self.assertions.lock().unwrap().push(assertion);
    }

    fn diag(&mut self, text: &str) {
        self.diags.lock().unwrap().push(text.to_string());
    }
}
