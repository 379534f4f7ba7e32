//! One-character parameter names become short options

use argaction::{Action, CallArgs, Parameter, Signature};
use clap::Command;

fn echo(args: CallArgs) -> anyhow::Result<()> {
    let word = args.str(0)?;
    if args.bool(1)? {
        println!("{}", word.to_uppercase());
    } else {
        println!("{word}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(
        Command::new(env!("CARGO_BIN_NAME"))
            .about("Short option can be defined with single character function argument"),
    );

    action.add(
        Signature::new("echo")
            .param(Parameter::positional("word"))
            .param(Parameter::positional("u").with_default(false).help("upper case")),
        echo,
    )?;

    action.run()?
}
