//! Installing the process-wide subscriber

use crate::args::LogDestination;
use crate::config::LogConfig;
use crate::error::{LoggingError, Result};
use crate::layer::TemplateLayer;
use crate::sink::{LogSink, SyslogSink, WriterSink};
use clap::ArgMatches;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Sink for `destination`, or `None` when logging is disabled
pub fn open_sink(destination: &LogDestination) -> Result<Option<Box<dyn LogSink>>> {
    let sink: Box<dyn LogSink> = match destination {
        LogDestination::None => return Ok(None),
        LogDestination::Console => Box::new(WriterSink::new(std::io::stderr())),
        LogDestination::File(path) => Box::new(WriterSink::append(path)?),
        LogDestination::Syslog(facility) => Box::new(SyslogSink::connect(*facility)?),
    };
    Ok(Some(sink))
}

/// Subscriber for `config` without installing it
///
/// `default` is used when the configuration names no destination.
pub fn build_subscriber(
    config: &LogConfig,
    default: &LogDestination,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    let directive = config.filter_directive(default);
    let filter = EnvFilter::try_new(&directive).map_err(|e| LoggingError::Filter {
        directive: directive.clone(),
        message: e.to_string(),
    })?;

    let template = config.template()?;
    let layer = open_sink(config.destination.as_ref().unwrap_or(default))?
        .map(|sink| TemplateLayer::new(template, sink));

    Ok(Registry::default().with(filter).with(layer))
}

/// Install the global subscriber described by `config`
pub fn init_with_config(config: &LogConfig, default: &LogDestination) -> Result<()> {
    build_subscriber(config, default)?
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    tracing::debug!(level = ?config.level, destination = ?config.destination, "logging initialized");
    Ok(())
}

/// Install the global subscriber from the `--log-*` flags in `matches`
///
/// `default` applies when no destination flag was given.
pub fn init_logging(matches: &ArgMatches, default: LogDestination) -> Result<()> {
    let config = LogConfig::from_matches(matches)?;
    init_with_config(&config, &default)
}

/// [`init_logging`] with standard error as the default destination
pub fn init_default_logging(matches: &ArgMatches) -> Result<()> {
    init_logging(matches, LogDestination::Console)
}
