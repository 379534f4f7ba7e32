//! End-to-end behaviour of registered commands: parse a command line with the
//! registry's parser, dispatch it and compare with a direct call.

use argaction::{
    Action, ActionError, ArgOverride, ArgValue, CallArgs, Callable, ElementType, EnumTable,
    Exposed, Parameter, Registration, RegistrationError, Signature, SpecAction, ValueType,
};
use clap::{error::ErrorKind, Command, ValueEnum};
use rstest::rstest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Level {
    Debug,
    Info,
    Error,
}

/// Registry holding a single command built from `signature`
///
/// The handler echoes the rebuilt call arguments so each test can check what
/// the callable would have received.
fn action_for(signature: Signature) -> Action<CallArgs> {
    action_with(Registration::new(Callable::new(signature, |args: CallArgs| args)))
}

fn action_with(registration: Registration<CallArgs>) -> Action<CallArgs> {
    let mut action = Action::new(Command::new("test"));
    action.register(registration).unwrap();
    action
}

fn run<R>(action: &Action<R>, line: &str) -> Result<R, ActionError> {
    action.try_run_from(std::iter::once("test").chain(line.split_whitespace()))
}

fn parse_kind<R: std::fmt::Debug>(action: &Action<R>, line: &str) -> ErrorKind {
    run(action, line)
        .unwrap_err()
        .parse_kind()
        .expect("expected a parse error")
}

fn strs(values: &[&str]) -> Vec<ArgValue> {
    values.iter().map(|value| ArgValue::from(*value)).collect()
}

#[test]
fn test_command_is_mandatory() {
    let action = action_for(Signature::new("simple_func"));

    assert_eq!(parse_kind(&action, ""), ErrorKind::MissingSubcommand);
}

#[test]
fn test_command_has_to_be_registered() {
    let action = action_for(Signature::new("simple_func"));

    assert!(run(&action, "unknown").is_err());
}

#[test]
fn test_function_name_is_hyphenated_command() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(Signature::new("simple_func"), |_args: CallArgs| "simple")
        .unwrap();

    assert_eq!(run(&action, "simple-func").unwrap(), "simple");
    assert!(run(&action, "simple_func").is_err());
}

#[test]
fn test_aliases_are_valid_commands() {
    let action = action_with(
        Registration::new(Callable::new(Signature::new("simple_func"), |args: CallArgs| args))
            .alias("alias"),
    );

    assert_eq!(run(&action, "alias").unwrap(), CallArgs::default());
}

#[test]
fn test_cli_arguments_are_passed_in_order() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("concatenate")
                .param(Parameter::positional("a"))
                .param(Parameter::positional("b")),
            |args: CallArgs| -> anyhow::Result<String> {
                Ok(format!("{}{}", args.str(0)?, args.str(1)?))
            },
        )
        .unwrap();

    assert_eq!(run(&action, "concatenate first_ second").unwrap().unwrap(), "first_second");
    assert_eq!(
        parse_kind(&action, "concatenate first"),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_cli_argument_follows_the_annotation() {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("number").typed(ValueType::Integer)),
    );

    assert_eq!(run(&action, "action 42").unwrap().positional, [ArgValue::Int(42)]);
    assert_eq!(parse_kind(&action, "action invalid"), ErrorKind::ValueValidation);
}

#[rstest]
#[case("action", "default")]
#[case("action --option any", "any")]
fn test_defaulted_arg_is_an_option(#[case] line: &str, #[case] expected: &str) {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("option").with_default("default")),
    );

    assert_eq!(run(&action, line).unwrap().positional, strs(&[expected]));
}

#[test]
fn test_annotated_option_is_coerced() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("action").param(
                Parameter::positional("option")
                    .typed(ValueType::Integer)
                    .with_default(10),
            ),
            |args: CallArgs| args.int(0).map(|option| option + 10),
        )
        .unwrap();

    assert_eq!(run(&action, "action --option 32").unwrap(), Ok(42));
    assert_eq!(run(&action, "action").unwrap(), Ok(20));
    assert_eq!(
        parse_kind(&action, "action --option invalid"),
        ErrorKind::ValueValidation
    );
}

#[test]
fn test_arguments_and_options_together() {
    let action = action_for(
        Signature::new("action")
            .param(Parameter::positional("arg"))
            .param(Parameter::positional("option").with_default("default")),
    );

    assert_eq!(
        run(&action, "action arg_ --option opt").unwrap().positional,
        strs(&["arg_", "opt"])
    );
}

#[rstest]
#[case(false, "action", false)]
#[case(false, "action --flag", true)]
#[case(true, "action", true)]
#[case(true, "action --flag", false)]
fn test_bool_default_is_negating_flag(
    #[case] default: bool,
    #[case] line: &str,
    #[case] expected: bool,
) {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("flag").with_default(default)),
    );

    assert_eq!(run(&action, line).unwrap().positional, [ArgValue::Bool(expected)]);
}

#[test]
fn test_bool_flag_takes_no_value() {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("flag").with_default(false)),
    );

    assert!(run(&action, "action --flag value").is_err());
}

#[test]
fn test_keyword_only_without_default_is_positional() {
    let action = action_for(Signature::new("action").param(Parameter::keyword_only("arg")));

    let args = run(&action, "action value").unwrap();
    assert!(args.positional.is_empty());
    assert_eq!(args.keyword.get("arg"), Some(&ArgValue::from("value")));
}

#[rstest]
#[case("action", "default")]
#[case("action --option value", "value")]
fn test_defaulted_keyword_only_is_option(#[case] line: &str, #[case] expected: &str) {
    let action = action_for(
        Signature::new("action").param(Parameter::keyword_only("option").with_default("default")),
    );

    assert_eq!(
        run(&action, line).unwrap().keyword.get("option"),
        Some(&ArgValue::from(expected))
    );
}

#[rstest]
#[case("action", &[])]
#[case("action a b c", &["a", "b", "c"])]
fn test_varg_takes_zero_or_more(#[case] line: &str, #[case] expected: &[&str]) {
    let action = action_for(Signature::new("action").param(Parameter::variadic("args")));

    assert_eq!(run(&action, line).unwrap().positional, strs(expected));
}

#[test]
fn test_arg_with_varg() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("action")
                .param(Parameter::positional("arg"))
                .param(Parameter::variadic("args")),
            |args: CallArgs| -> Vec<String> {
                let prefix = args.str(0).unwrap_or_default();
                args.rest(1).iter().map(|item| format!("{prefix}{item}")).collect()
            },
        )
        .unwrap();

    assert_eq!(
        run(&action, "action egg. spam spamspam").unwrap(),
        ["egg.spam", "egg.spamspam"]
    );
}

#[rstest]
#[case("action ham. egg. eggegg.", &["ham.egg.spam", "ham.eggegg.spam"])]
#[case("action ham. egg. eggegg. --option cheese", &["ham.egg.cheese", "ham.eggegg.cheese"])]
fn test_arg_varg_and_keyword_option(#[case] line: &str, #[case] expected: &[&str]) {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("action")
                .param(Parameter::positional("arg"))
                .param(Parameter::variadic("args"))
                .param(Parameter::keyword_only("option").with_default("spam")),
            |args: CallArgs| -> anyhow::Result<Vec<String>> {
                let arg = args.str(0)?;
                let option = args.str("option")?;
                Ok(args
                    .rest(1)
                    .iter()
                    .map(|item| format!("{arg}{item}{option}"))
                    .collect())
            },
        )
        .unwrap();

    assert_eq!(run(&action, line).unwrap().unwrap(), expected);
}

#[test]
fn test_single_character_default_is_short_option() {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("o").with_default("default")),
    );

    assert_eq!(run(&action, "action -o option").unwrap().positional, strs(&["option"]));
    assert!(run(&action, "action --o option").is_err());
}

#[test]
fn test_varg_annotation_is_applied() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("summa").param(Parameter::variadic("args").typed(ValueType::Integer)),
            |args: CallArgs| -> i64 { args.positional.iter().filter_map(ArgValue::as_int).sum() },
        )
        .unwrap();

    assert_eq!(run(&action, "summa 13 26").unwrap(), 39);
    assert_eq!(parse_kind(&action, "summa invalid"), ErrorKind::ValueValidation);
}

#[test]
fn test_choices_from_enum_annotation() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("action")
                .param(Parameter::positional("level").enumerated(EnumTable::of::<Level>())),
            |args: CallArgs| args.member::<Level, _>(0),
        )
        .unwrap();

    assert_eq!(parse_kind(&action, "action unknown"), ErrorKind::InvalidValue);
    assert_eq!(run(&action, "action info").unwrap(), Ok(Level::Info));
}

#[rstest]
#[case("log word", Level::Info)]
#[case("log word --level error", Level::Error)]
#[case("log word --level debug", Level::Debug)]
fn test_enum_option_with_default(#[case] line: &str, #[case] expected: Level) {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("log").param(Parameter::positional("word")).param(
                Parameter::positional("level")
                    .enumerated(EnumTable::of::<Level>())
                    .with_default(ArgValue::from_enum(&Level::Info).unwrap()),
            ),
            |args: CallArgs| args.member::<Level, _>(1),
        )
        .unwrap();

    assert_eq!(run(&action, line).unwrap(), Ok(expected));
}

#[test]
fn test_enum_option_rejects_unlisted_member() {
    let action = action_for(
        Signature::new("log").param(
            Parameter::positional("level")
                .enumerated(EnumTable::of::<Level>())
                .with_default("info"),
        ),
    );

    assert_eq!(parse_kind(&action, "log --level fatal"), ErrorKind::InvalidValue);
}

#[test]
fn test_sequence_of_enum_appends_members() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("log").param(Parameter::positional("message")).param(
                Parameter::positional("level")
                    .sequence_of(ElementType::Enum(EnumTable::of::<Level>()))
                    .with_default(ArgValue::empty_list()),
            ),
            |args: CallArgs| -> Vec<Level> {
                args.list(1)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|value| value.to_enum().ok())
                    .collect()
            },
        )
        .unwrap();

    assert_eq!(run(&action, "log m").unwrap(), Vec::<Level>::new());
    assert_eq!(
        run(&action, "log m --level info --level debug --level info").unwrap(),
        [Level::Info, Level::Debug, Level::Info]
    );
    assert_eq!(parse_kind(&action, "log m --level fatal"), ErrorKind::InvalidValue);
}

#[test]
fn test_sequence_of_integers() {
    let action = action_for(
        Signature::new("sum").param(
            Parameter::positional("value")
                .sequence_of(ElementType::Scalar(ValueType::Integer))
                .with_default(ArgValue::empty_list()),
        ),
    );

    assert_eq!(
        run(&action, "sum --value 1 --value 2").unwrap().positional,
        [ArgValue::list([1, 2])]
    );
}

#[rstest]
#[case("action", 0)]
#[case("action -n", 1)]
#[case("action -nn", 2)]
fn test_count_action_can_be_injected(#[case] line: &str, #[case] expected: i64) {
    let action = action_with(
        Registration::new(Callable::new(
            Signature::new("action").param(Parameter::positional("n").with_default(0)),
            |args: CallArgs| args,
        ))
        .override_arg("n", ArgOverride::new().action(SpecAction::Count)),
    );

    assert_eq!(run(&action, line).unwrap().positional, [ArgValue::Int(expected)]);
}

#[test]
fn test_underscore_in_positional() {
    let action = action_for(Signature::new("action").param(Parameter::positional("my_param")));

    let entry = action.entry("action").unwrap();
    assert_eq!(entry.specs()[0].id, "my-param");
    assert_eq!(
        run(&action, "action underscore_param").unwrap().positional,
        strs(&["underscore_param"])
    );
}

#[test]
fn test_underscore_in_varg() {
    let mut action = Action::new(Command::new("test"));
    action
        .add(
            Signature::new("action").param(Parameter::variadic("my_params")),
            |args: CallArgs| -> String {
                args.positional
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(":")
            },
        )
        .unwrap();

    assert_eq!(action.entry("action").unwrap().specs()[0].id, "my-params");
    assert_eq!(run(&action, "action p_1 p_2").unwrap(), "p_1:p_2");
}

#[test]
fn test_underscore_in_keyword_option() {
    let action = action_for(
        Signature::new("action").param(Parameter::keyword_only("kw_arg").with_default("DEFAULT")),
    );

    assert_eq!(action.entry("action").unwrap().specs()[0].id, "kw_arg");
    assert_eq!(
        run(&action, "action --kw-arg other").unwrap().keyword.get("kw_arg"),
        Some(&ArgValue::from("other"))
    );
}

#[test]
fn test_underscore_in_defaulted_arg() {
    let action = action_for(
        Signature::new("action")
            .param(Parameter::positional("default_param").with_default("DEFAULT")),
    );

    assert_eq!(
        run(&action, "action --default-param other").unwrap().positional,
        strs(&["other"])
    );
}

#[test]
fn test_function_exposed_without_its_name() {
    let exposed = Exposed::new(
        Command::new("test"),
        Callable::new(
            Signature::new("arg_and_option")
                .param(Parameter::positional("arg"))
                .param(Parameter::positional("option").with_default("default")),
            |args: CallArgs| -> anyhow::Result<String> {
                Ok(format!("{}{}", args.str(0)?, args.str(1)?))
            },
        ),
    )
    .unwrap();

    assert_eq!(
        exposed
            .try_run_from(["test", "one_", "--option", "two"])
            .unwrap()
            .unwrap(),
        "one_two"
    );
}

#[test]
fn test_round_trip_matches_direct_call() {
    let signature = Signature::new("mix")
        .param(Parameter::positional("word"))
        .param(Parameter::positional("upper").with_default(false))
        .param(Parameter::positional("times").with_default(1))
        .param(Parameter::variadic("rest"))
        .param(Parameter::keyword_only("sep").with_default(","));
    let handler = |args: CallArgs| -> anyhow::Result<String> {
        let word = if args.bool(1)? {
            args.str(0)?.to_uppercase()
        } else {
            args.str(0)?.to_string()
        };
        let rest: Vec<String> = args.rest(3).iter().map(ToString::to_string).collect();
        Ok(format!(
            "{}{}{}",
            word.repeat(args.int(2)? as usize),
            args.str("sep")?,
            rest.join("+")
        ))
    };

    let mut keyword = indexmap::IndexMap::new();
    keyword.insert("sep".to_string(), ArgValue::from("/"));
    let direct = CallArgs::new(
        vec![
            ArgValue::from("ab"),
            ArgValue::Bool(true),
            ArgValue::Int(2),
            ArgValue::from("x"),
            ArgValue::from("y"),
        ],
        keyword,
    );
    let expected = handler(direct.clone()).unwrap();

    let mut action = Action::new(Command::new("test"));
    action.add(signature.clone(), handler).unwrap();
    let tokens = argaction::cli_tokens(&signature, &direct);
    let line = std::iter::once("test".to_string())
        .chain(std::iter::once("mix".to_string()))
        .chain(tokens);

    assert_eq!(action.try_run_from(line).unwrap().unwrap(), expected);
    assert_eq!(expected, "ABAB/x+y");
}

#[test]
fn test_negative_numbers_round_trip() {
    let signature = Signature::new("shift")
        .param(Parameter::positional("count").typed(ValueType::Integer))
        .param(Parameter::positional("num").with_default(0))
        .param(Parameter::variadic("values").typed(ValueType::Float));
    let direct = CallArgs::new(
        vec![
            ArgValue::Int(-3),
            ArgValue::Int(-5),
            ArgValue::Float(-1.5),
            ArgValue::Float(2.0),
        ],
        indexmap::IndexMap::new(),
    );

    let tokens = argaction::cli_tokens(&signature, &direct);
    assert_eq!(tokens, ["-3", "-1.5", "2", "--num", "-5"]);

    let action = action_for(signature);
    let line = ["test".to_string(), "shift".to_string()].into_iter().chain(tokens);
    assert_eq!(action.try_run_from(line).unwrap(), direct);
}

#[rstest]
#[case("action -5", ArgValue::Int(-5))]
#[case("action -0", ArgValue::Int(0))]
#[case("action 7", ArgValue::Int(7))]
fn test_negative_positional_value(#[case] line: &str, #[case] expected: ArgValue) {
    let action = action_for(
        Signature::new("action").param(Parameter::positional("n").typed(ValueType::Integer)),
    );

    assert_eq!(run(&action, line).unwrap().positional, [expected]);
}

#[test]
fn test_dash_leading_string_is_not_a_value() {
    let action = action_for(Signature::new("action").param(Parameter::positional("word")));

    assert!(run(&action, "action -x").is_err());
}

#[rstest]
#[case("action a b --kw c", &["a", "b"], "c")]
#[case("action --kw c", &[], "c")]
#[case("action --kw c a", &["a"], "c")]
fn test_required_keyword_after_varg(
    #[case] line: &str,
    #[case] rest: &[&str],
    #[case] keyword: &str,
) {
    let action = action_for(
        Signature::new("action")
            .param(Parameter::variadic("rest"))
            .param(Parameter::keyword_only("kw")),
    );

    let args = run(&action, line).unwrap();
    assert_eq!(args.positional, strs(rest));
    assert_eq!(args.keyword.get("kw"), Some(&ArgValue::from(keyword)));
}

#[test]
fn test_required_keyword_after_varg_is_mandatory() {
    let action = action_for(
        Signature::new("action")
            .param(Parameter::variadic("rest"))
            .param(Parameter::keyword_only("kw")),
    );

    assert_eq!(
        parse_kind(&action, "action a b c"),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_required_keyword_after_varg_round_trip() {
    let signature = Signature::new("action")
        .param(Parameter::variadic("rest"))
        .param(Parameter::keyword_only("kw"));
    let mut keyword = indexmap::IndexMap::new();
    keyword.insert("kw".to_string(), ArgValue::from("c"));
    let direct = CallArgs::new(strs(&["a", "b"]), keyword);

    let tokens = argaction::cli_tokens(&signature, &direct);
    assert_eq!(tokens, ["a", "b", "--kw", "c"]);

    let action = action_for(signature);
    let line = ["test".to_string(), "action".to_string()].into_iter().chain(tokens);
    assert_eq!(action.try_run_from(line).unwrap(), direct);
}

#[rstest]
#[case(Signature::new("action").param(Parameter::positional("help").with_default("x")))]
#[case(Signature::new("action").param(Parameter::positional("h").with_default("x")))]
#[case(
    Signature::new("action")
        .param(Parameter::positional("my_opt").with_default(1))
        .param(Parameter::keyword_only("my-opt").with_default(2))
)]
fn test_conflicting_option_names_fail_registration(#[case] signature: Signature) {
    let mut action = Action::new(Command::new("test"));

    let error = action
        .register(Registration::new(Callable::new(signature, |args: CallArgs| args)))
        .unwrap_err();

    assert!(matches!(error, RegistrationError::ArgumentConflict { .. }), "{error}");
    assert!(action.entries().is_empty());
}
