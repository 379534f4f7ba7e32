//! A parameter with a default becomes an option

use argaction::{Action, CallArgs, Parameter, Signature};
use clap::Command;

fn echo(args: CallArgs) -> anyhow::Result<()> {
    println!("{} {}", args.str(0)?, args.str(1)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action =
        Action::new(Command::new(env!("CARGO_BIN_NAME")).about("CLI option from default value"));

    action.add(
        Signature::new("echo")
            .param(Parameter::positional("word"))
            .param(Parameter::positional("name").with_default("joe")),
        echo,
    )?;

    action.run()?
}
