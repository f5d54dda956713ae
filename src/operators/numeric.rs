// ABOUTME: Numeric operators: num formats numbers, round rounds half away from zero
// ABOUTME: num accepts a style keyword or a custom number pattern as its argument

use super::{Operator, OperatorContext, OperatorResult};
use crate::locale::NumberStyle;
use crate::template::error::OperatorError;
use crate::template::value::Value;

pub struct NumOperator;

impl Operator for NumOperator {
    fn name(&self) -> &str {
        "num"
    }

    fn description(&self) -> &str {
        "Format a number: decimal, noloc, currency, percent, scientific, spellout, *bytes or a pattern"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let number = context.number(value, "num")?;
        let locale = context.locale();

        let formatted = match argument.filter(|argument| !argument.is_empty()) {
            None => locale.format_number(number, NumberStyle::Decimal),
            Some(argument) => match NumberStyle::from_keyword(argument) {
                Some(style) => locale.format_number(number, style),
                None => locale.format_pattern(number, argument),
            },
        };

        formatted.map(Value::Str).ok_or_else(|| {
            OperatorError::invalid_argument(
                "num",
                format!("cannot format {} as {:?}", number, argument.unwrap_or("decimal")),
            )
        })
    }
}

pub struct RoundOperator;

impl Operator for RoundOperator {
    fn name(&self) -> &str {
        "round"
    }

    fn description(&self) -> &str {
        "Round to the nearest integer, halves away from zero"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        Ok(context.number(value, "round")?.round_half_away().into())
    }
}

#[cfg(test)]
mod tests {
    use crate::locale::Locale;
    use crate::template::{TemplateEngine, VariableSet};

    fn expand(template: &str, value: impl Into<crate::Value>) -> String {
        TemplateEngine::new().expand(template, &VariableSet::new().with("n", value))
    }

    #[test]
    fn test_num_styles() {
        assert_eq!(expand("{n|num}", 12563), "12,563");
        assert_eq!(expand("{n|num:noloc}", 12563), "12563");
        assert_eq!(expand("{n|num:cur}", 4.5), "$4.50");
        assert_eq!(expand("{n|num:pct}", 0.25), "25%");
        assert_eq!(expand("{n|num:spellout}", 21), "twenty-one");
        assert_eq!(expand("{n|num:file}", 2_000_000), "2 MB");
    }

    #[test]
    fn test_num_pattern() {
        assert_eq!(expand("{n|num:#,##0.0}", 1234.56), "1,234.6");
        assert_eq!(expand("{n|num:'#'000}", 7), "#007");
    }

    #[test]
    fn test_num_accepts_numeric_strings() {
        assert_eq!(expand("{n|num}", "1234.5"), "1,234.5");
        assert_eq!(expand("{n|num}", "many"), "(null)");
    }

    #[test]
    fn test_num_follows_engine_locale() {
        let engine = TemplateEngine::new().with_locale(Locale::de_de());
        let variables = VariableSet::new().with("n", 1234.5);

        assert_eq!(engine.expand("{n|num}", &variables), "1.234,5");
        assert_eq!(engine.expand("{n|num:noloc}", &variables), "1234.5");
    }

    #[test]
    fn test_num_unformattable_pattern_fails() {
        assert_eq!(expand("{n|num:nonsense}", 3), "(null)");
    }

    #[test]
    fn test_round() {
        assert_eq!(expand("{n|round}", 2.5), "3");
        assert_eq!(expand("{n|round}", -2.5), "-3");
        assert_eq!(expand("{n|round}", 2.49), "2");
        assert_eq!(expand("{n|round|num:noloc}", 12345.6), "12346");
    }
}
