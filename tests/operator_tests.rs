// ABOUTME: Integration tests for built-in and custom operators
// ABOUTME: Exercises operator pipelines through the public engine API

mod common;
use common::{expand, quiet_engine};

use templet::{
    Locale, Operator, OperatorContext, OperatorError, OperatorRegistry, OperatorResult,
    TemplateEngine, Value, VariableSet,
};

struct Repeat;

impl Operator for Repeat {
    fn name(&self) -> &str {
        "repeat"
    }

    fn description(&self) -> &str {
        "Repeat the value: repeat:count"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let count: usize = argument
            .ok_or_else(|| OperatorError::missing_argument("repeat"))?
            .parse()
            .map_err(|_| OperatorError::invalid_argument("repeat", "count must be a number"))?;
        let text = context.string(value, "repeat")?;
        Ok(Value::from(text.repeat(count)))
    }
}

#[test]
fn test_custom_operator_struct() {
    let mut engine = quiet_engine();
    engine.register_operator(Repeat).unwrap();
    let variables = VariableSet::new().with("s", "ab");

    assert_eq!(engine.expand("{s|repeat:3}", &variables), "ababab");
    assert_eq!(engine.expand("{s|repeat:x}", &variables), "(null)");
    assert_eq!(engine.expand("{s|repeat}", &variables), "(null)");
}

#[test]
fn test_custom_operator_can_expand_recursively() {
    let mut engine = quiet_engine();
    engine
        .register_fn("wrap", |value, argument, context| {
            let inner = context.string(value, "wrap")?;
            let frame = context.expand(argument.unwrap_or("[{inner}]"))?;
            Ok(Value::from(frame.replace("{inner}", &inner)))
        })
        .unwrap();
    let variables = VariableSet::new().with("s", "x").with("left", "<");

    assert_eq!(engine.expand("{s|wrap}", &variables), "[x]");
}

#[test]
fn test_with_custom_operators_builder() {
    let engine = TemplateEngine::new()
        .with_custom_operators(|registry| {
            registry.register(Repeat)?;
            Ok(())
        })
        .unwrap();

    assert!(engine.registry().contains("repeat"));
    assert!(engine.registry().contains("num"));
}

#[test]
fn test_registry_clone_is_independent() {
    let base = OperatorRegistry::new();
    let mut extended = base.clone();
    extended.register(Repeat).unwrap();

    assert!(!base.contains("repeat"));
    assert!(extended.contains("repeat"));
}

#[test]
fn test_engine_clone_keeps_registrations_separate() {
    let original = quiet_engine();
    let mut extended = original.clone();
    extended.register_operator(Repeat).unwrap();

    let variables = VariableSet::new().with("s", "z");
    assert_eq!(original.expand("{s|repeat:2}", &variables), "(null)");
    assert_eq!(extended.expand("{s|repeat:2}", &variables), "zz");
}

#[test]
fn test_number_formatting_pipeline() {
    let variables = VariableSet::new().with("bytes", 5_368_709_120_i64).with("ratio", 0.487);

    assert_eq!(expand("{bytes|num:memory}", &variables), "5 GB");
    assert_eq!(expand("{bytes|num:file}", &variables), "5.37 GB");
    assert_eq!(expand("{ratio|num:percent}", &variables), "49%");
    assert_eq!(expand("{ratio|num:0.0}", &variables), "0.5");
}

#[test]
fn test_localized_number_formatting() {
    let engine = quiet_engine().with_locale(Locale::fr_fr());
    let variables = VariableSet::new().with("n", 1234567.891);

    assert_eq!(engine.expand("{n}", &variables), "1\u{202F}234\u{202F}567,891");
    assert_eq!(engine.expand("{n|num:noloc}", &variables), "1234567.891");
}

#[test]
fn test_chained_text_operators() {
    let variables = VariableSet::new().with("title", "  élan vital  ");

    assert_eq!(expand("{title|trim|capitalize}", &variables), "Élan Vital");
    assert_eq!(expand("{title|trim|fold:diacritics|uppercase}", &variables), "ELAN VITAL");
    assert_eq!(expand("{title|trim|length|plural:char;chars}", &variables), "chars");
}

#[test]
fn test_plural_rule_pipeline_russian() {
    let template = "{n} {n|plur:7;файл;файла;файлов}";
    let cases = [(1, "1 файл"), (3, "3 файла"), (11, "11 файлов"), (21, "21 файл")];
    for (n, expected) in cases {
        assert_eq!(expand(template, &VariableSet::new().with("n", n)), expected);
    }
}

#[test]
fn test_select_with_computed_index() {
    let variables = VariableSet::new().with("score", 2.7);
    assert_eq!(
        expand("{score|round|select:zero;one;two;three}", &variables),
        "three"
    );
}
