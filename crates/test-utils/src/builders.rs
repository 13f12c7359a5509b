#![allow(dead_code)]

use std::collections::BTreeMap;
use runcap::config::{CheckConfig, ConfigSection, RawSuiteFile, SuiteFile};

/// Builder for `SuiteFile` to simplify test setup.
pub struct SuiteFileBuilder {
    suite: RawSuiteFile,
}

impl SuiteFileBuilder {
    pub fn new() -> Self {
        Self {
            suite: RawSuiteFile {
                config: ConfigSection::default(),
                check: BTreeMap::new(),
            },
        }
    }

    pub fn with_check(mut self, name: &str, check: CheckConfig) -> Self {
        self.suite.check.insert(name.to_string(), check);
        self
    }

    pub fn fail_fast(mut self, val: bool) -> Self {
        self.suite.config.fail_fast = val;
        self
    }

    pub fn build(self) -> SuiteFile {
        SuiteFile::try_from(self.suite).expect("Failed to build valid suite from builder")
    }
}

impl Default for SuiteFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CheckConfig`.
pub struct CheckConfigBuilder {
    check: CheckConfig,
}

impl CheckConfigBuilder {
    pub fn new<S: AsRef<str>>(cmd: &[S]) -> Self {
        Self {
            check: CheckConfig {
                cmd: cmd.iter().map(|s| s.as_ref().to_string()).collect(),
                ..CheckConfig::default()
            },
        }
    }

    /// `sh -c <script>`.
    pub fn sh(script: &str) -> Self {
        Self::new(&crate::sh(script))
    }

    pub fn exit(mut self, code: i64) -> Self {
        self.check.exit = Some(code);
        self
    }

    pub fn stdout(mut self, expected: &str) -> Self {
        self.check.stdout = Some(expected.to_string());
        self
    }

    pub fn stderr(mut self, expected: &str) -> Self {
        self.check.stderr = Some(expected.to_string());
        self
    }

    pub fn stdout_matches(mut self, pattern: &str) -> Self {
        self.check.stdout_matches = Some(pattern.to_string());
        self
    }

    pub fn stderr_matches(mut self, pattern: &str) -> Self {
        self.check.stderr_matches = Some(pattern.to_string());
        self
    }

    pub fn build(self) -> CheckConfig {
        self.check
    }
}
