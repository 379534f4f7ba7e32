//! Logging that falls back to syslog when no destination flag is given

use argaction::{Action, CallArgs, Parameter, Signature};
use argaction_logging::{add_log_arguments, init_logging, Facility, LogDestination};
use clap::Command;

fn emit_debug(args: CallArgs) -> anyhow::Result<()> {
    tracing::debug!("{}", args.str(0)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(add_log_arguments(
        Command::new(env!("CARGO_BIN_NAME")).about("Default log handler can be defined"),
    ));

    action.add(
        Signature::new("emit_debug").param(Parameter::positional("message")),
        emit_debug,
    )?;

    let matches = action.parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_logging(&matches, LogDestination::Syslog(Facility::User))?;

    action.dispatch_matches(&matches)?
}
