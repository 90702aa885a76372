//! Error handling for the stagelog crate
//!
//! All fallible operations return typed errors. The only fallible surface
//! is file-sink management on [`crate::Logger`]; log calls themselves are
//! best-effort and never fail.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    /// The requested log file could not be created or truncated.
    #[error("Log file unavailable: {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returned by the strict [`crate::Level`] parser for unknown level names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level: {name}")]
pub struct ParseLevelError {
    pub name: String,
}

pub type Result<T> = std::result::Result<T, LogError>;
