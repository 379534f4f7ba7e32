//! Variadic values are coerced by the annotation

use argaction::{Action, ArgValue, CallArgs, Parameter, Signature, ValueType};
use clap::Command;

fn summa(args: CallArgs) -> anyhow::Result<()> {
    let total: i64 = args.positional.iter().filter_map(ArgValue::as_int).sum();
    println!("{total}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut action =
        Action::new(Command::new(env!("CARGO_BIN_NAME")).about("Arbitrary arguments can be annotated"));

    action.add(
        Signature::new("summa").param(Parameter::variadic("num").typed(ValueType::Integer)),
        summa,
    )?;

    action.run()?
}
