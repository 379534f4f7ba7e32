//! A command reachable under several names

use argaction::{Action, CallArgs, Callable, Parameter, Registration, Signature};
use clap::Command;

fn echo(args: CallArgs) -> anyhow::Result<()> {
    println!("{}", args.str(0)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(Command::new(env!("CARGO_BIN_NAME")).about("Register command aliases"));

    action.register(
        Registration::new(Callable::new(
            Signature::new("echo")
                .doc("echo the cli argument")
                .param(Parameter::positional("parameter")),
            echo,
        ))
        .aliases(["print", "p"]),
    )?;

    action.run()?
}
