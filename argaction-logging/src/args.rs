//! The `--log-*` flags

use crate::error::{LoggingError, Result};
use clap::{Arg, ArgAction, ArgGroup, Command, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const LEVEL_ID: &str = "log_level";
pub const FORMAT_ID: &str = "log_format";
pub const DATEFMT_ID: &str = "log_datefmt";
pub const NONE_ID: &str = "log_none";
pub const FILE_ID: &str = "log_file";
pub const SYSLOG_ID: &str = "log_syslog";
pub const CONSOLE_ID: &str = "log_console";
pub const DESTINATION_GROUP: &str = "log_destination";

pub const DEFAULT_FORMAT: &str = "{asctime} {name} {levelname} {message}";
pub const DEFAULT_DATEFMT: &str = "%Y-%m-%d %H:%M:%S";

/// Level names accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
    Critical,
}

impl LogLevel {
    /// Closest `tracing` level; `fatal` and `critical` collapse into `ERROR`
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Fatal | LogLevel::Critical => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true).map_err(|_| LoggingError::UnknownLevel(name.to_string()))
    }
}

/// Syslog facilities with their RFC 3164 codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    #[value(name = "kern")]
    Kern,
    #[value(name = "user")]
    User,
    #[value(name = "mail")]
    Mail,
    #[value(name = "daemon")]
    Daemon,
    #[value(name = "auth")]
    Auth,
    #[value(name = "syslog")]
    Syslog,
    #[value(name = "lpr")]
    Lpr,
    #[value(name = "news")]
    News,
    #[value(name = "uucp")]
    Uucp,
    #[value(name = "cron")]
    Cron,
    #[value(name = "authpriv")]
    Authpriv,
    #[value(name = "ftp")]
    Ftp,
    #[value(name = "local0")]
    Local0,
    #[value(name = "local1")]
    Local1,
    #[value(name = "local2")]
    Local2,
    #[value(name = "local3")]
    Local3,
    #[value(name = "local4")]
    Local4,
    #[value(name = "local5")]
    Local5,
    #[value(name = "local6")]
    Local6,
    #[value(name = "local7")]
    Local7,
}

impl Facility {
    pub fn code(self) -> u8 {
        match self {
            Facility::Kern => 0,
            Facility::User => 1,
            Facility::Mail => 2,
            Facility::Daemon => 3,
            Facility::Auth => 4,
            Facility::Syslog => 5,
            Facility::Lpr => 6,
            Facility::News => 7,
            Facility::Uucp => 8,
            Facility::Cron => 9,
            Facility::Authpriv => 10,
            Facility::Ftp => 11,
            Facility::Local0 => 16,
            Facility::Local1 => 17,
            Facility::Local2 => 18,
            Facility::Local3 => 19,
            Facility::Local4 => 20,
            Facility::Local5 => 21,
            Facility::Local6 => 22,
            Facility::Local7 => 23,
        }
    }
}

impl FromStr for Facility {
    type Err = LoggingError;

    fn from_str(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| LoggingError::UnknownFacility(name.to_string()))
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// Logging disabled
    None,
    /// Standard error
    #[default]
    Console,
    /// Appended to a file, created if missing
    File(PathBuf),
    /// Local syslog daemon
    Syslog(Facility),
}

/// Add the logging flags to `command`
///
/// The destination flags form one mutually exclusive group.
pub fn add_log_arguments(command: Command) -> Command {
    command
        .arg(
            Arg::new(LEVEL_ID)
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(clap::builder::EnumValueParser::<LogLevel>::new())
                .default_value("info")
                .help("Lowest level that is logged"),
        )
        .arg(
            Arg::new(FORMAT_ID)
                .long("log-format")
                .value_name("FORMAT")
                .default_value(DEFAULT_FORMAT)
                .help("Line template using {asctime}, {name}, {levelname} and {message}"),
        )
        .arg(
            Arg::new(DATEFMT_ID)
                .long("log-datefmt")
                .value_name("DATEFMT")
                .default_value(DEFAULT_DATEFMT)
                .help("strftime format of {asctime}"),
        )
        .arg(
            Arg::new(SYSLOG_ID)
                .long("log-syslog")
                .value_name("FACILITY")
                .value_parser(clap::builder::EnumValueParser::<Facility>::new())
                .help("Log into syslog"),
        )
        .arg(
            Arg::new(NONE_ID)
                .long("log-none")
                .action(ArgAction::SetTrue)
                .help("Disable logging"),
        )
        .arg(
            Arg::new(FILE_ID)
                .long("log-file")
                .value_name("LOG_FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Log into LOG_FILE"),
        )
        .arg(
            Arg::new(CONSOLE_ID)
                .long("log-console")
                .action(ArgAction::SetTrue)
                .help("Log to standard error"),
        )
        .group(
            ArgGroup::new(DESTINATION_GROUP)
                .args([SYSLOG_ID, NONE_ID, FILE_ID, CONSOLE_ID])
                .multiple(false),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rstest::rstest;

    fn command() -> Command {
        add_log_arguments(Command::new("test"))
    }

    #[rstest]
    #[case(LogLevel::Debug, tracing::Level::DEBUG)]
    #[case(LogLevel::Info, tracing::Level::INFO)]
    #[case(LogLevel::Warning, tracing::Level::WARN)]
    #[case(LogLevel::Error, tracing::Level::ERROR)]
    #[case(LogLevel::Fatal, tracing::Level::ERROR)]
    #[case(LogLevel::Critical, tracing::Level::ERROR)]
    fn test_level_mapping(#[case] level: LogLevel, #[case] expected: tracing::Level) {
        assert_eq!(level.to_tracing(), expected);
    }

    #[rstest]
    #[case("kern", 0)]
    #[case("authpriv", 10)]
    #[case("local0", 16)]
    #[case("local7", 23)]
    fn test_facility_codes(#[case] name: &str, #[case] code: u8) {
        assert_eq!(name.parse::<Facility>().unwrap().code(), code);
    }

    #[test]
    fn test_unknown_names() {
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(LoggingError::UnknownLevel(_))
        ));
        assert!(matches!(
            "local9".parse::<Facility>(),
            Err(LoggingError::UnknownFacility(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let matches = command().try_get_matches_from(["test"]).unwrap();

        assert_eq!(matches.get_one::<LogLevel>(LEVEL_ID), Some(&LogLevel::Info));
        assert_eq!(
            matches.get_one::<String>(FORMAT_ID).map(String::as_str),
            Some(DEFAULT_FORMAT)
        );
        assert!(!matches.get_flag(NONE_ID));
    }

    #[test]
    fn test_level_choices_are_enforced() {
        let error = command()
            .try_get_matches_from(["test", "--log-level", "verbose"])
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_destinations_are_mutually_exclusive() {
        let error = command()
            .try_get_matches_from(["test", "--log-none", "--log-file", "app.log"])
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_value(LogDestination::Syslog(Facility::Local3)).unwrap();
        assert_eq!(json, serde_json::json!({"syslog": "local3"}));
    }
}
