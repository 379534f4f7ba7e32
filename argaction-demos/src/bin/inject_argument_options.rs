//! Derived arguments can be overridden per parameter

use argaction::{Action, ArgOverride, CallArgs, Callable, Parameter, Registration, Signature, SpecAction};
use clap::Command;

fn repeat(args: CallArgs) -> anyhow::Result<()> {
    let times = usize::try_from(args.int(1)?)?;
    println!("{}", args.str(0)?.repeat(times));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action =
        Action::new(Command::new(env!("CARGO_BIN_NAME")).about("Inject argument options"));

    action.register(
        Registration::new(Callable::new(
            Signature::new("repeat")
                .doc("repeat the word")
                .param(Parameter::positional("word"))
                .param(Parameter::positional("n").with_default(0)),
            repeat,
        ))
        .override_arg(
            "n",
            ArgOverride::new()
                .action(SpecAction::Count)
                .help("repeat once per occurrence"),
        ),
    )?;

    action.run()?
}
