// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the templet binary for expand, check and operators commands

mod common;
use common::{stdout, TestEnvironment};

#[test]
fn test_cli_help_command() {
    let env = TestEnvironment::new();
    let output = env.templet(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("templet"));
    assert!(text.contains("expand"));
}

#[test]
fn test_cli_version_command() {
    let env = TestEnvironment::new();
    let output = env.templet(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_expand_with_variables() {
    let env = TestEnvironment::new();
    let config = env.no_config();
    let output = env.templet(&[
        "--config",
        config.to_str().unwrap(),
        "expand",
        "{n|num} item{n|plural:s} for {name}",
        "-V",
        "n=1200",
        "-V",
        "name=Kai",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1,200 items for Kai");
}

#[test]
fn test_cli_expand_positional_and_locale() {
    let env = TestEnvironment::new();
    let config = env.no_config();
    let output = env.templet(&[
        "--config",
        config.to_str().unwrap(),
        "expand",
        "{0|num:cur}",
        "-p",
        "9.5",
        "--locale",
        "de-DE",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "9,50\u{A0}€");
}

#[test]
fn test_cli_expand_localized_with_table() {
    let env = TestEnvironment::new();
    let config = env.no_config();
    let table = env.write_file("de.yaml", "\"{n} file{n|plural:s}\": \"{n} Datei{n|plural:en}\"\n");

    let output = env.templet(&[
        "--config",
        config.to_str().unwrap(),
        "expand",
        "{n} file{n|plural:s}",
        "--localize",
        "--table",
        table.to_str().unwrap(),
        "-V",
        "n=2",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2 Dateien");
}

#[test]
fn test_cli_config_file_supplies_defaults() {
    let env = TestEnvironment::new();
    let config = env.write_file(
        "templet.yaml",
        "locale: de-DE\ntemplate_vars:\n  product: Templet\n  size: \"2048\"\n",
    );
    let vars = env.write_file("vars.json", r#"{"size": 1536.5}"#);

    let output = env.templet(&[
        "--config",
        config.to_str().unwrap(),
        "expand",
        "{product}: {size}",
        "--vars-file",
        vars.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Templet: 1.536,5");
}

#[test]
fn test_cli_rejects_bad_variable() {
    let env = TestEnvironment::new();
    let config = env.no_config();
    let output = env.templet(&["--config", config.to_str().unwrap(), "expand", "{x}", "-V", "novalue"]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_check_command() {
    let env = TestEnvironment::new();
    let config = env.no_config();

    let valid = env.templet(&["--config", config.to_str().unwrap(), "check", "{n|plural:s}"]);
    assert!(valid.status.success());
    assert!(stdout(&valid).contains("valid"));

    let lenient = env.templet(&["--config", config.to_str().unwrap(), "check", "oops }"]);
    assert!(lenient.status.success());
    assert!(stdout(&lenient).contains("unbalanced brace"));

    let strict = env.templet(&["--config", config.to_str().unwrap(), "check", "oops }", "--strict"]);
    assert!(!strict.status.success());
}

#[test]
fn test_cli_operators_command() {
    let env = TestEnvironment::new();
    let config = env.no_config();
    let output = env.templet(&["--config", config.to_str().unwrap(), "operators"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["num", "plur", "select", "fold", "debugdesc"] {
        assert!(text.lines().any(|line| line.starts_with(name)), "missing {name}");
    }
}
