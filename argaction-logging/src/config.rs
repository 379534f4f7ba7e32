//! Logging configuration read from the command line

use crate::args::{
    Facility, LogDestination, LogLevel, CONSOLE_ID, DATEFMT_ID, DEFAULT_DATEFMT, DEFAULT_FORMAT,
    FILE_ID, FORMAT_ID, LEVEL_ID, NONE_ID, SYSLOG_ID,
};
use crate::error::{LoggingError, Result};
use crate::format::Template;
use clap::parser::MatchesError;
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the process-wide logger
///
/// `destination` is `None` when no destination flag was given; the caller's
/// default applies in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: String,
    pub datefmt: String,
    pub destination: Option<LogDestination>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: DEFAULT_FORMAT.to_string(),
            datefmt: DEFAULT_DATEFMT.to_string(),
            destination: None,
        }
    }
}

fn matches_error(error: MatchesError) -> LoggingError {
    LoggingError::Matches(error.to_string())
}

impl LogConfig {
    /// Read the flags added by [`add_log_arguments`](crate::add_log_arguments)
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let defaults = Self::default();

        let level = matches
            .try_get_one::<LogLevel>(LEVEL_ID)
            .map_err(matches_error)?
            .copied()
            .unwrap_or(defaults.level);
        let format = matches
            .try_get_one::<String>(FORMAT_ID)
            .map_err(matches_error)?
            .cloned()
            .unwrap_or(defaults.format);
        let datefmt = matches
            .try_get_one::<String>(DATEFMT_ID)
            .map_err(matches_error)?
            .cloned()
            .unwrap_or(defaults.datefmt);

        let destination = if matches
            .try_get_one::<bool>(NONE_ID)
            .map_err(matches_error)?
            .copied()
            .unwrap_or(false)
        {
            Some(LogDestination::None)
        } else if let Some(path) = matches
            .try_get_one::<PathBuf>(FILE_ID)
            .map_err(matches_error)?
        {
            Some(LogDestination::File(path.clone()))
        } else if let Some(facility) = matches
            .try_get_one::<Facility>(SYSLOG_ID)
            .map_err(matches_error)?
        {
            Some(LogDestination::Syslog(*facility))
        } else if matches
            .try_get_one::<bool>(CONSOLE_ID)
            .map_err(matches_error)?
            .copied()
            .unwrap_or(false)
        {
            Some(LogDestination::Console)
        } else {
            None
        };

        let config = Self {
            level,
            format,
            datefmt,
            destination,
        };
        config.template()?;
        Ok(config)
    }

    /// `EnvFilter` directive for this configuration
    ///
    /// `off` when the effective destination disables logging.
    pub fn filter_directive(&self, default: &LogDestination) -> String {
        match self.destination.as_ref().unwrap_or(default) {
            LogDestination::None => "off".to_string(),
            _ => self.level.to_tracing().to_string().to_lowercase(),
        }
    }

    pub fn template(&self) -> Result<Template> {
        Template::parse(&self.format, &self.datefmt)
    }
}
