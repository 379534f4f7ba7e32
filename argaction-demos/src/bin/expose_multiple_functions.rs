//! Several functions, one subcommand each

use argaction::{Action, CallArgs, Parameter, Signature};
use clap::Command;

fn echo(args: CallArgs) -> anyhow::Result<()> {
    println!("{}", args.str(0)?);
    Ok(())
}

fn oche(args: CallArgs) -> anyhow::Result<()> {
    println!("{}", args.str(0)?.chars().rev().collect::<String>());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action =
        Action::new(Command::new(env!("CARGO_BIN_NAME")).about("Expose multiple functions as commands"));

    action.add(
        Signature::new("echo")
            .doc("echo the cli argument")
            .param(Parameter::positional("parameter")),
        echo,
    )?;
    action.add(
        Signature::new("oche")
            .doc("echo the reversed cli argument")
            .param(Parameter::positional("parameter")),
        oche,
    )?;

    action.run()?
}
