//! End-to-end runs of the demo programs

use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;

fn demo(name: &str) -> Command {
    Command::cargo_bin(name).unwrap()
}

#[rstest]
#[case("expose-single-function", &["hello"], "hello\n")]
#[case("expose-multiple-functions", &["echo", "hello"], "hello\n")]
#[case("expose-multiple-functions", &["oche", "hello"], "olleh\n")]
#[case("register-command-alias", &["echo", "a"], "a\n")]
#[case("register-command-alias", &["print", "b"], "b\n")]
#[case("register-command-alias", &["p", "c"], "c\n")]
#[case("cli-option-from-default-value", &["echo", "hi"], "hi joe\n")]
#[case("cli-option-from-default-value", &["echo", "hi", "--name", "bob"], "hi bob\n")]
#[case("cli-option-flag-from-bool-default", &["echo", "hi"], "hi\n")]
#[case("cli-option-flag-from-bool-default", &["echo", "hi", "--upper"], "HI\n")]
#[case("short-option", &["echo", "hi", "-u"], "HI\n")]
#[case("varg-nargs", &["spam", "a", "b", "c"], "ab\nac\n")]
#[case("varg-nargs", &["spam", "a"], "")]
#[case("varg-annotated", &["summa", "13", "26"], "39\n")]
#[case("enum-choices", &["log", "hi"], "I: hi\n")]
#[case("enum-choices", &["log", "hi", "--level", "debug"], "D: hi\n")]
#[case("append-cli-options", &["log", "m"], "")]
#[case(
    "append-cli-options",
    &["log", "m", "--level", "info", "--level", "debug"],
    "Level.info: m\nLevel.debug: m\n"
)]
#[case("inject-argument-options", &["repeat", "ab", "-nn"], "abab\n")]
#[case("inject-argument-options", &["repeat", "ab"], "\n")]
fn test_demo_output(#[case] name: &str, #[case] args: &[&str], #[case] expected: &str) {
    demo(name).args(args).assert().success().stdout(expected.to_string());
}

#[rstest]
#[case("expose-multiple-functions", &[])]
#[case("expose-multiple-functions", &["unknown", "x"])]
#[case("varg-annotated", &["summa", "1", "x"])]
#[case("enum-choices", &["log", "hi", "--level", "verbose"])]
#[case("append-cli-options", &["log", "m", "--level", "error"])]
#[case("short-option", &["echo"])]
fn test_demo_usage_error(#[case] name: &str, #[case] args: &[&str]) {
    demo(name)
        .args(args)
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn test_help_lists_commands_and_aliases() {
    demo("register-command-alias")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("echo"))
        .stdout(predicate::str::contains("print"));
}

#[test]
fn test_logging_to_console_at_debug_level() {
    demo("logging-demo")
        .args(["--log-level", "debug", "emit-debug", "hello"])
        .assert()
        .success()
        .stderr(predicate::str::contains("logging_demo DEBUG hello"));
}

#[test]
fn test_debug_is_hidden_at_default_level() {
    demo("logging-demo")
        .args(["emit-debug", "hello"])
        .assert()
        .success()
        .stderr(predicate::str::contains("hello").not());
}

#[test]
fn test_log_none_silences_warnings() {
    demo("logging-demo")
        .args(["--log-none", "emit-warning", "careful"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_logging_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.log");

    demo("logging-demo")
        .arg("--log-file")
        .arg(&path)
        .args(["--log-format", "{levelname}: {message}", "emit-warning", "careful"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "WARNING: careful\n");
}

#[test]
fn test_logging_flags_are_exclusive() {
    demo("logging-demo")
        .args(["--log-none", "--log-console", "emit-warning", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_explicit_destination_overrides_syslog_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug.log");

    demo("default-log-handler")
        .args(["--log-level", "debug", "--log-format", "{message}", "--log-file"])
        .arg(&path)
        .args(["emit-debug", "hello"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.lines().any(|line| line == "hello"), "{contents}");
}
