// src/config/model.rs

use std::collections::BTreeMap;

use regex::Regex;
use serde::Deserialize;

/// Suite file exactly as read from TOML.
///
/// ```toml
/// [config]
/// fail_fast = false
///
/// [check.greeting]
/// cmd = ["sh", "-c", "echo hello; exit 3"]
/// exit = 3
/// stdout = "hello\n"
/// stderr_matches = "^$"
/// ```
///
/// Use `SuiteFile::try_from` (or [`super::load_and_validate`]) to get a
/// validated suite.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSuiteFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// All checks from `[check.<name>]`, run in name order.
    #[serde(default)]
    pub check: BTreeMap<String, CheckConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Stop after the first check with any failing assertion.
    #[serde(default)]
    pub fail_fast: bool,
}

/// One `[check.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Program followed by its arguments; no shell involved.
    pub cmd: Vec<String>,

    /// Expected exit code, 0 when omitted. Kept wide here so that an
    /// out-of-range value is reported by validation instead of by serde.
    #[serde(default)]
    pub exit: Option<i64>,

    /// Exact expected stdout.
    #[serde(default)]
    pub stdout: Option<String>,

    /// Exact expected stderr.
    #[serde(default)]
    pub stderr: Option<String>,

    /// Regex that stdout must match.
    #[serde(default)]
    pub stdout_matches: Option<String>,

    /// Regex that stderr must match.
    #[serde(default)]
    pub stderr_matches: Option<String>,
}

/// A validated, ready-to-run check.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub cmd: Vec<String>,
    pub exit: u8,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub stdout_matches: Option<Regex>,
    pub stderr_matches: Option<Regex>,
}

impl Check {
    /// Number of reporter signals running this check produces.
    pub fn assertion_count(&self) -> usize {
        2 + [
            self.stdout.is_some(),
            self.stderr.is_some(),
            self.stdout_matches.is_some(),
            self.stderr_matches.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// Validated suite.
#[derive(Debug, Clone)]
pub struct SuiteFile {
    pub config: ConfigSection,
    pub checks: Vec<Check>,
}
