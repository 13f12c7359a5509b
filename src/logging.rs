// src/logging.rs

//! Logging setup for `runcap` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `--log-level` flag, then the `RUNCAP_LOG`
//! environment variable, then falls back to `warn`. Logs go to stderr so
//! stdout carries nothing but TAP.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

const LOG_ENV: &str = "RUNCAP_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

/// Flag beats environment; an unparsable environment value is ignored.
fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_level.and_then(parse_level_str))
        .unwrap_or(Level::WARN)
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_strings_are_case_insensitive() {
        assert_eq!(parse_level_str(" DEBUG "), Some(Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }

    #[test]
    fn flag_wins_over_environment() {
        assert_eq!(resolve_level(Some(LogLevel::Trace), Some("error")), Level::TRACE);
        assert_eq!(resolve_level(Some(LogLevel::Error), None), Level::ERROR);
    }

    #[test]
    fn environment_is_used_without_flag() {
        assert_eq!(resolve_level(None, Some("info")), Level::INFO);
    }

    #[test]
    fn default_is_warn() {
        assert_eq!(resolve_level(None, None), Level::WARN);
        assert_eq!(resolve_level(None, Some("chatty")), Level::WARN);
    }

    #[test]
    fn second_install_is_an_error() {
        // The first call may or may not win the global slot; the second never does.
        let _ = init_logging(Some(LogLevel::Error));
        assert!(init_logging(Some(LogLevel::Error)).is_err());
    }
}
