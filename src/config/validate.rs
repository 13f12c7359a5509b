// src/config/validate.rs

use regex::Regex;

use crate::config::model::{Check, CheckConfig, RawSuiteFile, SuiteFile};
use crate::errors::{Result, RuncapError};

impl TryFrom<RawSuiteFile> for SuiteFile {
    type Error = RuncapError;

    fn try_from(raw: RawSuiteFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_checks(&raw)?;

        let checks = raw
            .check
            .into_iter()
            .map(|(name, cfg)| validate_check(name, cfg))
            .collect::<Result<Vec<_>>>()?;

        Ok(SuiteFile {
            config: raw.config,
            checks,
        })
    }
}

fn ensure_has_checks(raw: &RawSuiteFile) -> Result<()> {
    if raw.check.is_empty() {
        return Err(RuncapError::ConfigError(
            "suite must contain at least one [check.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_check(name: String, cfg: CheckConfig) -> Result<Check> {
    if cfg.cmd.is_empty() {
        return Err(RuncapError::ConfigError(format!(
            "check '{name}' has an empty `cmd`"
        )));
    }
    if cfg.cmd[0].is_empty() {
        return Err(RuncapError::ConfigError(format!(
            "check '{name}' has an empty program name in `cmd`"
        )));
    }

    let exit = match cfg.exit {
        None => 0,
        Some(code) => u8::try_from(code).map_err(|_| {
            RuncapError::ConfigError(format!(
                "check '{name}' has `exit = {code}`; expected a value in 0..=255"
            ))
        })?,
    };

    let stdout_matches = compile(&name, "stdout_matches", cfg.stdout_matches.as_deref())?;
    let stderr_matches = compile(&name, "stderr_matches", cfg.stderr_matches.as_deref())?;

    Ok(Check {
        name,
        cmd: cfg.cmd,
        exit,
        stdout: cfg.stdout,
        stderr: cfg.stderr,
        stdout_matches,
        stderr_matches,
    })
}

fn compile(check: &str, field: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| {
                RuncapError::ConfigError(format!(
                    "check '{check}' has an invalid `{field}` regex: {e}"
                ))
            })
        })
        .transpose()
}
