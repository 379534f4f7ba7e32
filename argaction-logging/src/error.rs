//! Errors raised while reading logging flags or installing the subscriber

use argaction::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the logging setup
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Level name outside the supported set
    #[error("Unknown log level '{0}'")]
    UnknownLevel(String),

    /// Facility name outside the syslog facility table
    #[error("Unknown syslog facility '{0}'")]
    UnknownFacility(String),

    /// strftime pattern chrono cannot render
    #[error("Invalid log date format '{0}'")]
    InvalidDateFormat(String),

    /// Log file could not be opened for appending
    #[error("Cannot open log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No local syslog socket could be reached
    #[error("Syslog is not available: {0}")]
    SyslogUnavailable(String),

    /// The matches were not produced by a command with the logging flags
    #[error("Logging flags missing from matches: {0}")]
    Matches(String),

    /// Level filter directive did not parse
    #[error("Invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    /// A global subscriber is already installed
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

impl Severity for LoggingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LoggingError::AlreadyInitialized => ErrorSeverity::Warning,
            LoggingError::File { .. } | LoggingError::SyslogUnavailable(_) => ErrorSeverity::Error,
            _ => ErrorSeverity::Critical,
        }
    }
}

/// Result type for logging setup
pub type Result<T> = std::result::Result<T, LoggingError>;
