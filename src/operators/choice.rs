// ABOUTME: Operators that choose between alternatives: plural, pluraz, plur, if, ifuse, select, not
// ABOUTME: Selected alternatives are expanded again with the same variables

use super::plural_rules::PluralRule;
use super::{Operator, OperatorContext, OperatorResult};
use crate::template::error::OperatorError;
use crate::template::value::Value;

fn required<'a>(argument: Option<&'a str>, operator: &str) -> Result<&'a str, OperatorError> {
    argument.ok_or_else(|| OperatorError::missing_argument(operator))
}

fn expand_choice(context: &mut OperatorContext<'_>, choice: &str) -> OperatorResult {
    context.expand(choice).map(Value::Str)
}

/// English-style plurals with optional dual form.
#[derive(Debug, Clone, Copy)]
pub struct PluralOperator {
    name: &'static str,
    zero_is_singular: bool,
}

impl PluralOperator {
    pub const PLURAL: Self = Self {
        name: "plural",
        zero_is_singular: false,
    };

    /// Treats zero as singular, as French does.
    pub const PLURAZ: Self = Self {
        name: "pluraz",
        zero_is_singular: true,
    };
}

impl Operator for PluralOperator {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        if self.zero_is_singular {
            "Like plural, but zero takes the singular form"
        } else {
            "Choose plural:suffix, plural:singular;plural or plural:singular;dual;plural"
        }
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let argument = required(argument, self.name)?;
        let count = context.number(value, self.name)?.as_f64();
        let singular = count == 1.0 || (self.zero_is_singular && count == 0.0);

        let forms = context.split_arguments(argument);
        let chosen = match *forms.as_slice() {
            [plural] => {
                if singular {
                    ""
                } else {
                    plural
                }
            }
            [one, other] => {
                if singular {
                    one
                } else {
                    other
                }
            }
            [one, two, other] => {
                if singular {
                    one
                } else if count == 2.0 {
                    two
                } else {
                    other
                }
            }
            _ => {
                return Err(OperatorError::invalid_argument(
                    self.name,
                    format!("expected 1 to 3 forms, found {}", forms.len()),
                ))
            }
        };
        expand_choice(context, chosen)
    }
}

/// Plural forms chosen by a numbered language rule: `plur:rule;form;form...`.
pub struct PlurOperator;

impl Operator for PlurOperator {
    fn name(&self) -> &str {
        "plur"
    }

    fn description(&self) -> &str {
        "Choose among forms with numbered plural rule 1-16: plur:rule;form;..."
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let argument = required(argument, "plur")?;
        let parts = context.split_arguments(argument);
        let (rule_text, forms) = parts
            .split_first()
            .ok_or_else(|| OperatorError::missing_argument("plur"))?;

        let rule = rule_text
            .parse::<u32>()
            .ok()
            .and_then(PluralRule::from_number)
            .ok_or_else(|| {
                OperatorError::invalid_argument("plur", format!("unknown plural rule {:?}", rule_text))
            })?;
        if forms.is_empty() {
            return Err(OperatorError::invalid_argument("plur", "no plural forms given"));
        }

        let count = context.number(value, "plur")?;
        let count = count
            .truncate()
            .ok_or_else(|| OperatorError::coercion("plur", "count"))?
            .unsigned_abs();

        let index = rule.form_index(count);
        let Some(form) = forms.get(index) else {
            context.warn(format!(
                "plural rule {} needs {} forms but only {} given",
                rule.number(),
                rule.form_count(),
                forms.len()
            ));
            return Err(OperatorError::invalid_argument(
                "plur",
                format!("no form at index {} for count {}", index, count),
            ));
        };
        let form = *form;
        expand_choice(context, form)
    }
}

fn branches<'a>(
    context: &mut OperatorContext<'_>,
    argument: Option<&'a str>,
    operator: &str,
) -> Result<(&'a str, Option<&'a str>), OperatorError> {
    let argument = required(argument, operator)?;
    let parts = context.split_arguments(argument);
    match *parts.as_slice() {
        [when_true] => Ok((when_true, None)),
        [when_true, when_false] => Ok((when_true, Some(when_false))),
        _ => Err(OperatorError::invalid_argument(
            operator,
            format!("expected at most 2 branches, found {}", parts.len()),
        )),
    }
}

/// `if:true-branch[;false-branch]`
pub struct IfOperator;

impl Operator for IfOperator {
    fn name(&self) -> &str {
        "if"
    }

    fn description(&self) -> &str {
        "Expand the first branch when the value is true, else the second"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let (when_true, when_false) = branches(context, argument, "if")?;
        let chosen = if context.boolean(value, "if")? {
            when_true
        } else {
            when_false.unwrap_or_default()
        };
        expand_choice(context, chosen)
    }
}

/// `ifuse:true-key[;false-key]`, yielding another variable's value unchanged.
pub struct IfUseOperator;

impl Operator for IfUseOperator {
    fn name(&self) -> &str {
        "ifuse"
    }

    fn description(&self) -> &str {
        "Use the value of the first named variable when true, else the second"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let (when_true, when_false) = branches(context, argument, "ifuse")?;
        let key = if context.boolean(value, "ifuse")? {
            when_true
        } else {
            when_false.unwrap_or_default()
        };
        if key.is_empty() {
            return Ok(Value::Str(String::new()));
        }

        context
            .variables()
            .lookup_key(key)
            .cloned()
            .ok_or_else(|| OperatorError::UnknownVariable {
                operator: "ifuse".to_string(),
                name: key.to_string(),
            })
    }
}

/// `select:item0;item1;...`, with out-of-range indices choosing the last item.
pub struct SelectOperator;

impl Operator for SelectOperator {
    fn name(&self) -> &str {
        "select"
    }

    fn description(&self) -> &str {
        "Expand the item at the value's index, or the last item when out of range"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let argument = required(argument, "select")?;
        let number = context.number(value, "select")?;
        let items = context.split_arguments(argument);

        let last = items.len() - 1;
        let index = number
            .truncate()
            .and_then(|index| usize::try_from(index).ok())
            .filter(|&index| index <= last)
            .unwrap_or(last);
        let item = items[index];
        expand_choice(context, item)
    }
}

pub struct NotOperator;

impl Operator for NotOperator {
    fn name(&self) -> &str {
        "not"
    }

    fn description(&self) -> &str {
        "Logical negation"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        Ok(Value::Bool(!context.boolean(value, "not")?))
    }
}

#[cfg(test)]
mod tests {
    use crate::template::{TemplateEngine, VariableSet};

    fn expand(template: &str, variables: &VariableSet) -> String {
        TemplateEngine::new().expand(template, variables)
    }

    #[test]
    fn test_plural_suffix_form() {
        for (n, expected) in [(0, "0 items"), (1, "1 item"), (2, "2 items")] {
            let variables = VariableSet::new().with("n", n);
            assert_eq!(expand("{n} item{n|plural:s}", &variables), expected);
        }
    }

    #[test]
    fn test_plural_with_dual() {
        let template = "{n|plural:one;two;many}";
        let results: Vec<_> = [1, 2, 3]
            .iter()
            .map(|&n| expand(template, &VariableSet::new().with("n", n)))
            .collect();
        assert_eq!(results, vec!["one", "two", "many"]);
    }

    #[test]
    fn test_pluraz_zero_is_singular() {
        let variables = VariableSet::new().with("n", 0);
        assert_eq!(expand("{n|pluraz:fichier;fichiers}", &variables), "fichier");
        assert_eq!(expand("{n|plural:file;files}", &variables), "files");
    }

    #[test]
    fn test_plural_wrong_form_count() {
        let variables = VariableSet::new().with("n", 2);
        assert_eq!(expand("{n|plural:a;b;c;d}", &variables), "(null)");
        assert_eq!(expand("{n|plural}", &variables), "(null)");
    }

    #[test]
    fn test_plural_expands_nested_substitutions() {
        let variables = VariableSet::new().with("n", 3).with("noun", "cats");
        assert_eq!(expand("{n|plural:cat;{n} {noun}}", &variables), "3 cats");
    }

    #[test]
    fn test_plur_polish() {
        let template = "{n} {n|plur:9;minuta;minuty;minut}";
        let expected = [(1, "1 minuta"), (3, "3 minuty"), (5, "5 minut"), (22, "22 minuty")];
        for (n, text) in expected {
            assert_eq!(expand(template, &VariableSet::new().with("n", n)), text);
        }
    }

    #[test]
    fn test_plur_uses_absolute_truncated_count() {
        let variables = VariableSet::new().with("n", -1.7);
        assert_eq!(expand("{n|plur:1;one;other}", &variables), "one");
    }

    #[test]
    fn test_plur_failures() {
        let variables = VariableSet::new().with("n", 5);
        assert_eq!(expand("{n|plur:17;a;b}", &variables), "(null)");
        assert_eq!(expand("{n|plur:x;a;b}", &variables), "(null)");
        assert_eq!(expand("{n|plur:7;one}", &variables), "(null)");
        assert_eq!(expand("{n|plur:1}", &variables), "(null)");
    }

    #[test]
    fn test_if_branches() {
        let on = VariableSet::new().with("flag", true).with("name", "Ada");
        let off = VariableSet::new().with("flag", false);

        assert_eq!(expand("{flag|if:Hello {name}}", &on), "Hello Ada");
        assert_eq!(expand("{flag|if:yes}", &off), "");
        assert_eq!(expand("{flag|if:yes;no}", &off), "no");
        assert_eq!(expand("{flag|if:a;b;c}", &on), "(null)");
    }

    #[test]
    fn test_if_string_truthiness() {
        let variables = VariableSet::new().with("answer", "Yes please");
        assert_eq!(expand("{answer|if:agreed;refused}", &variables), "agreed");
    }

    #[test]
    fn test_ifuse_returns_value_unchanged() {
        let variables = VariableSet::new()
            .with("premium", true)
            .with("price", 1234.5)
            .with("fallback", "n/a");

        assert_eq!(expand("{premium|ifuse:price;fallback|num:cur}", &variables), "$1,234.50");
        assert_eq!(expand("{premium|not|ifuse:price;fallback}", &variables), "n/a");
        assert_eq!(expand("{premium|not|ifuse:price}", &variables), "");
        assert_eq!(expand("{premium|ifuse:missing}", &variables), "(null)");
        assert_eq!(expand("{premium|ifuse:@1}", &variables), "1,234.5");
    }

    #[test]
    fn test_select() {
        let template = "{w|select:Mon;Tue;Wed}";
        let pick = |w: f64| expand(template, &VariableSet::new().with("w", w));

        assert_eq!(pick(0.0), "Mon");
        assert_eq!(pick(1.9), "Tue");
        assert_eq!(pick(5.0), "Wed");
        assert_eq!(pick(-1.0), "Wed");
        assert_eq!(pick(f64::NAN), "Wed");
    }

    #[test]
    fn test_select_single_item() {
        let variables = VariableSet::new().with("w", 3);
        assert_eq!(expand("{w|select:only}", &variables), "only");
    }

    #[test]
    fn test_not() {
        let variables = VariableSet::new().with("zero", 0).with("text", "no");
        assert_eq!(expand("{zero|not}", &variables), "1");
        assert_eq!(expand("{zero|not|not}", &variables), "0");
        assert_eq!(expand("{text|not|if:negated}", &variables), "negated");
    }
}
