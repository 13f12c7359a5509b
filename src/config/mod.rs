// src/config/mod.rs

//! Check-suite configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a suite file from disk (`loader.rs`).
//! - Validate it into ready-to-run checks (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{Check, CheckConfig, ConfigSection, RawSuiteFile, SuiteFile};
