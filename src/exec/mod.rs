// src/exec/mod.rs

//! Process execution engine.
//!
//! This module launches a child process with piped stdio, drains its stdout
//! and stderr concurrently into two separate buffers, and reaps it to obtain
//! the raw wait status. Nothing here touches global state: every run returns
//! its own [`RunOutput`].
//!
//! - [`launcher`] spawns the child and closes its stdin right away.
//! - [`multiplex`] reads both pipes as they become ready until both hit EOF.
//! - [`runner`] ties launch, drain and wait together and reports the spawn
//!   outcome.
//! - [`expect`] holds the `run_ok` convenience assertion and its argument
//!   parsing.

pub mod expect;
pub mod launcher;
pub mod multiplex;
pub mod runner;

pub use expect::{RunOk, run_ok, run_ok_with, split_expected_exit};
pub use launcher::{Launched, launch};
pub use multiplex::{CHUNK_SIZE, Captured, drain};
pub use runner::{RunOutput, command_line, run};
