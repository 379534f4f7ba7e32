//! Enum annotations restrict the accepted values

use argaction::{Action, ArgValue, CallArgs, EnumTable, Parameter, Signature};
use clap::{Command, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Level {
    Debug,
    Info,
    Error,
}

fn log(args: CallArgs) -> anyhow::Result<()> {
    let word = args.str(0)?;
    match args.member::<Level, _>(1)? {
        Level::Debug => println!("D: {word}"),
        Level::Info => println!("I: {word}"),
        Level::Error => println!("E: {word}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action =
        Action::new(Command::new(env!("CARGO_BIN_NAME")).about("Enum annotation registers argument choices"));
    let info = ArgValue::from_enum(&Level::Info).ok_or_else(|| anyhow::anyhow!("no info level"))?;

    action.add(
        Signature::new("log")
            .param(Parameter::positional("word"))
            .param(
                Parameter::positional("level")
                    .enumerated(EnumTable::of::<Level>())
                    .with_default(info),
            ),
        log,
    )?;

    action.run()?
}
