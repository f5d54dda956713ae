// ABOUTME: String operators: case mapping, trim, length and fold
// ABOUTME: The _noloc case variants ignore the engine locale

use super::{Operator, OperatorContext, OperatorResult};
use crate::locale::FoldOptions;
use crate::template::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMapping {
    Upper,
    Lower,
    Capitalize,
}

#[derive(Debug, Clone, Copy)]
pub struct CaseOperator {
    name: &'static str,
    mapping: CaseMapping,
    localized: bool,
}

impl CaseOperator {
    pub const ALL: [CaseOperator; 6] = [
        CaseOperator::new("uppercase", CaseMapping::Upper, true),
        CaseOperator::new("lowercase", CaseMapping::Lower, true),
        CaseOperator::new("capitalize", CaseMapping::Capitalize, true),
        CaseOperator::new("uppercase_noloc", CaseMapping::Upper, false),
        CaseOperator::new("lowercase_noloc", CaseMapping::Lower, false),
        CaseOperator::new("capitalize_noloc", CaseMapping::Capitalize, false),
    ];

    const fn new(name: &'static str, mapping: CaseMapping, localized: bool) -> Self {
        Self {
            name,
            mapping,
            localized,
        }
    }
}

fn capitalize_invariant(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            output.push(ch);
            word_start = true;
        } else if word_start {
            output.extend(ch.to_uppercase());
            word_start = false;
        } else {
            output.extend(ch.to_lowercase());
        }
    }
    output
}

impl Operator for CaseOperator {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        match (self.mapping, self.localized) {
            (CaseMapping::Upper, true) => "Upper-case using the engine locale",
            (CaseMapping::Lower, true) => "Lower-case using the engine locale",
            (CaseMapping::Capitalize, true) => "Capitalize each word using the engine locale",
            (CaseMapping::Upper, false) => "Upper-case, locale independent",
            (CaseMapping::Lower, false) => "Lower-case, locale independent",
            (CaseMapping::Capitalize, false) => "Capitalize each word, locale independent",
        }
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let text = context.string(value, self.name)?;
        let mapped = if self.localized {
            let locale = context.locale();
            match self.mapping {
                CaseMapping::Upper => locale.uppercase(&text),
                CaseMapping::Lower => locale.lowercase(&text),
                CaseMapping::Capitalize => locale.capitalize(&text),
            }
        } else {
            match self.mapping {
                CaseMapping::Upper => text.to_uppercase(),
                CaseMapping::Lower => text.to_lowercase(),
                CaseMapping::Capitalize => capitalize_invariant(&text),
            }
        };
        Ok(Value::Str(mapped))
    }
}

pub struct TrimOperator;

impl Operator for TrimOperator {
    fn name(&self) -> &str {
        "trim"
    }

    fn description(&self) -> &str {
        "Remove leading and trailing whitespace"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let text = context.string(value, "trim")?;
        Ok(Value::from(text.trim()))
    }
}

pub struct LengthOperator;

impl Operator for LengthOperator {
    fn name(&self) -> &str {
        "length"
    }

    fn description(&self) -> &str {
        "Number of characters in the string form of the value"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let text = context.string(value, "length")?;
        Ok(Value::from(text.chars().count()))
    }
}

/// `fold:case,width,diacritics`
pub struct FoldOperator;

impl Operator for FoldOperator {
    fn name(&self) -> &str {
        "fold"
    }

    fn description(&self) -> &str {
        "Fold case, width and/or diacritics: fold:case,width,diacritics"
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        let text = context.string(value, "fold")?;
        let (options, unknown) = FoldOptions::parse(argument.unwrap_or_default());
        for option in unknown {
            context.warn(format!("fold ignores unknown option {:?}", option));
        }
        Ok(Value::Str(context.locale().fold(&text, options)))
    }
}

#[cfg(test)]
mod tests {
    use crate::locale::Locale;
    use crate::template::{DiagnosticKind, TemplateEngine, VariableSet};

    fn expand(template: &str, value: impl Into<crate::Value>) -> String {
        TemplateEngine::new().expand(template, &VariableSet::new().with("s", value))
    }

    #[test]
    fn test_case_mapping() {
        assert_eq!(expand("{s|uppercase}", "straße"), "STRASSE");
        assert_eq!(expand("{s|lowercase}", "HeLLo"), "hello");
        assert_eq!(expand("{s|capitalize}", "the quick fox"), "The Quick Fox");
    }

    #[test]
    fn test_turkish_locale_casing() {
        let engine = TemplateEngine::new().with_locale(Locale::tr_tr());
        let variables = VariableSet::new().with("s", "kilim");

        assert_eq!(engine.expand("{s|uppercase}", &variables), "KİLİM");
        assert_eq!(engine.expand("{s|uppercase_noloc}", &variables), "KILIM");
        assert_eq!(engine.expand("{s|capitalize_noloc}", &variables), "Kilim");
    }

    #[test]
    fn test_case_of_numbers_uses_string_form() {
        assert_eq!(expand("{s|uppercase}", 1234), "1,234");
    }

    #[test]
    fn test_trim_and_length() {
        assert_eq!(expand("[{s|trim}]", "  padded \n"), "[padded]");
        assert_eq!(expand("{s|length}", "héllo"), "5");
        assert_eq!(expand("{s|trim|length}", "  ab  "), "2");
    }

    #[test]
    fn test_fold() {
        assert_eq!(expand("{s|fold:case,diacritics}", "Ça Va"), "ca va");
        assert_eq!(expand("{s|fold:width}", "ＡＢ"), "AB");
        assert_eq!(expand("{s|fold}", "Unchanged"), "Unchanged");
    }

    #[test]
    fn test_fold_unknown_option_warns() {
        let engine = TemplateEngine::new();
        let variables = VariableSet::new().with("s", "Ab");
        let expansion = engine.expand_with_diagnostics("{s|fold:case,sparkle}", &variables);

        assert_eq!(expansion.text, "ab");
        assert_eq!(expansion.diagnostics[0].kind, DiagnosticKind::OperatorWarning);
    }
}
