//! A list default makes a repeatable option

use argaction::{Action, ArgValue, CallArgs, ElementType, EnumTable, Parameter, Signature};
use clap::{Command, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Level {
    Debug,
    Info,
}

fn log(args: CallArgs) -> anyhow::Result<()> {
    let message = args.str(0)?;
    for level in args.list(1)? {
        println!("{}: {message}", level.as_enum().map(ToString::to_string).unwrap_or_default());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action = Action::new(
        Command::new(env!("CARGO_BIN_NAME")).about("Sequence default value gives a repeatable option"),
    );

    action.add(
        Signature::new("log")
            .param(Parameter::positional("message"))
            .param(
                Parameter::positional("level")
                    .sequence_of(ElementType::Enum(EnumTable::of::<Level>()))
                    .with_default(ArgValue::empty_list()),
            ),
        log,
    )?;

    action.run()?
}
