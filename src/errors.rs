// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::StreamTag;

#[derive(Error, Debug)]
pub enum RuncapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("command is empty; expected at least a program name")]
    EmptyCommand,

    #[error("reading child {stream} failed: {source}")]
    StreamRead {
        stream: StreamTag,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for child process failed: {0}")]
    Wait(#[source] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RuncapError>;
