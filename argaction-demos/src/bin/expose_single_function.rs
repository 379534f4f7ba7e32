//! A single function exposed on the command without a subcommand

use argaction::{CallArgs, Callable, Exposed, Parameter, Signature};
use clap::Command;

fn echo(args: CallArgs) -> anyhow::Result<()> {
    println!("{}", args.str(0)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let exposed = Exposed::new(
        Command::new(env!("CARGO_BIN_NAME")).about("Expose a single function"),
        Callable::new(Signature::new("echo").param(Parameter::positional("word")), echo),
    )?;

    exposed.run()?
}
