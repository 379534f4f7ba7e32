//! The variadic parameter takes any number of trailing values

use argaction::{Action, CallArgs, Parameter, Signature};
use clap::Command;

fn spam(args: CallArgs) -> anyhow::Result<()> {
    let word = args.str(0)?;
    for spam in args.rest(1) {
        println!("{word}{spam}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(
        Command::new(env!("CARGO_BIN_NAME")).about("Variadic parameter is handled as a list argument"),
    );

    action.add(
        Signature::new("spam")
            .param(Parameter::positional("word"))
            .param(Parameter::variadic("spams")),
        spam,
    )?;

    action.run()?
}
