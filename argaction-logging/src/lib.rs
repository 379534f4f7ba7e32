//! # argaction-logging
//!
//! Standard `--log-*` flags for a `clap::Command` and a `tracing` subscriber
//! built from them.
//!
//! ```rust,no_run
//! use argaction_logging::{add_log_arguments, init_default_logging};
//! use clap::Command;
//!
//! let matches = add_log_arguments(Command::new("demo")).get_matches();
//! init_default_logging(&matches)?;
//! tracing::info!("ready");
//! # Ok::<(), argaction_logging::LoggingError>(())
//! ```
//!
//! | flag | effect |
//! |---|---|
//! | `--log-level LEVEL` | `debug`, `info` (default), `warning`, `error`, `fatal`, `critical` |
//! | `--log-format FORMAT` | line template, default `{asctime} {name} {levelname} {message}` |
//! | `--log-datefmt DATEFMT` | strftime format of `{asctime}`, default `%Y-%m-%d %H:%M:%S` |
//! | `--log-none` | disable logging |
//! | `--log-file PATH` | append to `PATH` |
//! | `--log-syslog FACILITY` | send to the local syslog daemon |
//! | `--log-console` | write to standard error |
//!
//! The four destination flags are mutually exclusive.

pub mod args;
pub mod config;
pub mod error;
pub mod format;
pub mod init;
pub mod layer;
pub mod sink;

pub use args::{add_log_arguments, Facility, LogDestination, LogLevel};
pub use config::LogConfig;
pub use error::{LoggingError, Result};
pub use format::Template;
pub use init::{build_subscriber, init_default_logging, init_logging, init_with_config};
pub use layer::TemplateLayer;
pub use sink::{LogSink, SyslogSink, WriterSink};
