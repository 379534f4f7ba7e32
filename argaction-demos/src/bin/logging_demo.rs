//! Logging flags installed next to the registered commands

use argaction::{Action, CallArgs, Parameter, Signature};
use argaction_logging::{add_log_arguments, init_default_logging};
use clap::Command;

fn emit_debug(args: CallArgs) -> anyhow::Result<()> {
    tracing::debug!("{}", args.str(0)?);
    Ok(())
}

fn emit_warning(args: CallArgs) -> anyhow::Result<()> {
    tracing::warn!("{}", args.str(0)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(add_log_arguments(
        Command::new(env!("CARGO_BIN_NAME")).about("Initiate logging from the command line"),
    ));

    action.add(
        Signature::new("emit_debug").param(Parameter::positional("message")),
        emit_debug,
    )?;
    action.add(
        Signature::new("emit_warning").param(Parameter::positional("message")),
        emit_warning,
    )?;

    let matches = action.parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_default_logging(&matches)?;

    action.dispatch_matches(&matches)?
}
