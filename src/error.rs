//! Centralized error types for the logger
//!
//! All logger errors are represented by the `LogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// All logger errors
#[derive(Debug)]
pub enum LogError {
    // === Arguments ===
    /// Empty alias, empty path, or empty value list
    InvalidArgument { field: &'static str },

    // === Destinations ===
    /// Failed to open a log file for writing
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a record to a sink
    Write {
        target: String,
        source: std::io::Error,
    },

    // === Lifecycle ===
    /// `init` was already called on this registry
    AlreadyInitialized,

    // === Config ===
    /// Failed to read the config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML or has invalid values
    ConfigParse { path: PathBuf, reason: String },
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileOpen { source, .. }
            | Self::Write { source, .. }
            | Self::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { field } => write!(f, "Invalid argument: {} is empty", field),
            Self::FileOpen { path, .. } => {
                write!(f, "Cannot open log file: {}", path.display())
            }
            Self::Write { target, source } => {
                write!(f, "Cannot write to {}: {}", target, source)
            }
            Self::AlreadyInitialized => write!(f, "Logger already initialized"),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;
