// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawSuiteFile, SuiteFile};
use crate::errors::Result;

/// Load a suite file and return the raw, unvalidated `RawSuiteFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to get
/// checks that are ready to run.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSuiteFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let raw: RawSuiteFile = toml::from_str(&contents)?;
    Ok(raw)
}

/// Load a suite file and validate it.
///
/// - Reads TOML.
/// - Applies defaults (`serde` + `Default` impls).
/// - Checks for empty suites, empty commands, out-of-range exit codes and
///   regexes that don't compile.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SuiteFile> {
    let raw = load_from_path(&path)?;
    SuiteFile::try_from(raw)
}

/// `runcap.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("runcap.toml")
}
