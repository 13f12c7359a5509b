// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `runcap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runcap",
    version,
    about = "Run commands, capture stdout and stderr separately, and check their exit status (TAP output).",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the check suite (TOML), used when no command is given.
    ///
    /// Default: `runcap.toml` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNCAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print what would run, without spawning anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print captured stdout/stderr as TAP comments.
    #[arg(long)]
    pub show_output: bool,

    /// Command to run instead of a suite.
    ///
    /// A leading number in 0..=255 is taken as the expected exit code:
    /// `runcap -- 2 sh -c 'exit 2'`.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
