// ABOUTME: Dynamic values flowing through substitution pipelines
// ABOUTME: Defines the Value enum, the Number type, and the Coercible extension trait

use crate::locale::{LocaleFormatter, NumberStyle};
use std::fmt;
use std::sync::Arc;

/// Text emitted for null values and failed pipelines.
pub const NULL_MARKER: &str = "(null)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(value) => value == 0,
            Number::Float(value) => value == 0.0,
        }
    }

    /// Integer part, or `None` for NaN and infinities.
    pub fn truncate(self) -> Option<i64> {
        match self {
            Number::Int(value) => Some(value),
            Number::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Number::Float(_) => None,
        }
    }

    /// Round half away from zero, narrowing to an integer when it fits.
    pub fn round_half_away(self) -> Number {
        match self {
            Number::Int(_) => self,
            Number::Float(value) => {
                let rounded = value.round();
                if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
                    Number::Int(rounded as i64)
                } else {
                    Number::Float(rounded)
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Capabilities a host type exposes to template pipelines.
///
/// Only the string form is required; it defaults to `Display`.
pub trait Coercible: fmt::Display + fmt::Debug + Send + Sync {
    fn to_template_string(&self, _locale: &dyn LocaleFormatter) -> Option<String> {
        Some(self.to_string())
    }

    fn to_number(&self) -> Option<Number> {
        None
    }

    fn to_boolean(&self) -> Option<bool> {
        self.to_number().map(|number| !number.is_zero())
    }

    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn debug_description(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Custom(Arc<dyn Coercible>),
}

impl Value {
    pub fn custom<C: Coercible + 'static>(value: C) -> Self {
        Value::Custom(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Custom(custom) => custom.type_name(),
        }
    }

    pub fn to_template_string(&self, locale: &dyn LocaleFormatter) -> Option<String> {
        match self {
            Value::Null => Some(NULL_MARKER.to_string()),
            Value::Bool(value) => {
                locale.format_number(Number::Int(i64::from(*value)), NumberStyle::Decimal)
            }
            Value::Int(value) => locale.format_number(Number::Int(*value), NumberStyle::Decimal),
            Value::Float(value) => {
                locale.format_number(Number::Float(*value), NumberStyle::Decimal)
            }
            Value::Str(value) => Some(value.clone()),
            Value::Custom(custom) => custom.to_template_string(locale),
        }
    }

    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Null => None,
            Value::Bool(value) => Some(Number::Int(i64::from(*value))),
            Value::Int(value) => Some(Number::Int(*value)),
            Value::Float(value) => Some(Number::Float(*value)),
            Value::Str(value) => parse_number(value),
            Value::Custom(custom) => custom.to_number(),
        }
    }

    pub fn to_boolean(&self) -> Option<bool> {
        match self {
            Value::Null => Some(false),
            Value::Bool(value) => Some(*value),
            Value::Int(value) => Some(*value != 0),
            Value::Float(value) => Some(*value != 0.0),
            Value::Str(value) => Some(leading_truth(value)),
            Value::Custom(custom) => custom.to_boolean(),
        }
    }

    /// Final text for a substitution; unconvertible values become the null marker.
    pub fn render(&self, locale: &dyn LocaleFormatter) -> String {
        self.to_template_string(locale)
            .unwrap_or_else(|| NULL_MARKER.to_string())
    }

    pub fn debug_description(&self) -> String {
        match self {
            Value::Null => "<null>".to_string(),
            Value::Bool(value) => format!("{:?}", value),
            Value::Int(value) => format!("{:?}", value),
            Value::Float(value) => format!("{:?}", value),
            Value::Str(value) => format!("{:?}", value),
            Value::Custom(custom) => custom
                .debug_description()
                .unwrap_or_else(|| custom.to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Parse a string as an integer, then as a float.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(Number::Int(value));
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Number::Float)
}

/// Truthiness of a string from its first significant character.
///
/// Leading whitespace, one sign and leading zeros are skipped; the string
/// is true when the next character is `Y`, `T` (either case) or `1`-`9`.
fn leading_truth(text: &str) -> bool {
    let text = text.trim_start();
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    let text = text.trim_start_matches('0');
    matches!(
        text.chars().next(),
        Some('Y' | 'y' | 'T' | 't' | '1'..='9')
    )
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map(Value::Int)
                        .unwrap_or(Value::Float(value as f64))
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(value) => Value::Int(value),
            Number::Float(value) => Value::Float(value),
        }
    }
}

impl From<Arc<dyn Coercible>> for Value {
    fn from(value: Arc<dyn Coercible>) -> Self {
        Value::Custom(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Value::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Value::from(value)
                } else {
                    number.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            serde_json::Value::String(value) => Value::Str(value),
            other => Value::Str(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[derive(Debug)]
    struct Temperature(f64);

    impl fmt::Display for Temperature {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}°", self.0)
        }
    }

    impl Coercible for Temperature {
        fn to_number(&self) -> Option<Number> {
            Some(Number::Float(self.0))
        }
    }

    #[test]
    fn test_null_coercions() {
        let locale = Locale::default();
        assert_eq!(Value::Null.render(&locale), "(null)");
        assert_eq!(Value::Null.to_number(), None);
        assert_eq!(Value::Null.to_boolean(), Some(false));
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(Value::from("42").to_number(), Some(Number::Int(42)));
        assert_eq!(Value::from(" 2.5 ").to_number(), Some(Number::Float(2.5)));
        assert_eq!(Value::from("abc").to_number(), None);
        assert_eq!(Value::from("inf").to_number(), None);
    }

    #[test]
    fn test_string_truthiness() {
        for text in ["yes", "Y", "true", "T", "1", "  +007", "-3"] {
            assert_eq!(Value::from(text).to_boolean(), Some(true), "{text}");
        }
        for text in ["no", "false", "0", "000", "", "  ", "-0", "maybe"] {
            assert_eq!(Value::from(text).to_boolean(), Some(false), "{text}");
        }
    }

    #[test]
    fn test_bool_number_coercion() {
        assert_eq!(Value::Bool(true).to_number(), Some(Number::Int(1)));
        assert_eq!(Value::Bool(false).to_number(), Some(Number::Int(0)));
        assert_eq!(Value::Int(-4).to_boolean(), Some(true));
        assert_eq!(Value::Float(0.0).to_boolean(), Some(false));
    }

    #[test]
    fn test_numbers_render_with_locale() {
        assert_eq!(Value::Int(12563).render(&Locale::default()), "12,563");
        assert_eq!(Value::Float(2.5).render(&Locale::default()), "2.5");
        assert_eq!(Value::Float(1234.5).render(&Locale::de_de()), "1.234,5");
        assert_eq!(Value::Bool(true).render(&Locale::default()), "1");
        assert_eq!(Value::Bool(false).render(&Locale::invariant()), "0");
    }

    #[test]
    fn test_custom_value_defaults() {
        let value = Value::custom(Temperature(21.5));
        assert_eq!(value.render(&Locale::default()), "21.5°");
        assert_eq!(value.to_number(), Some(Number::Float(21.5)));
        assert_eq!(value.to_boolean(), Some(true));
        assert_eq!(value.debug_description(), "21.5°");
        assert!(value.type_name().ends_with("Temperature"));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Number::Float(2.5).round_half_away(), Number::Int(3));
        assert_eq!(Number::Float(-2.5).round_half_away(), Number::Int(-3));
        assert_eq!(Number::Float(2.4).round_half_away(), Number::Int(2));
        assert_eq!(Number::Int(7).round_half_away(), Number::Int(7));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(Number::Float(4.9).truncate(), Some(4));
        assert_eq!(Number::Float(-0.5).truncate(), Some(0));
        assert_eq!(Number::Float(f64::NAN).truncate(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Int(3));
        assert_eq!(Value::from(serde_json::json!(u64::MAX)), Value::Float(u64::MAX as f64));
        assert_eq!(Value::from(serde_json::json!("x")), Value::from("x"));
        assert_eq!(Value::from(serde_json::json!([1, 2])), Value::from("[1,2]"));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }
}
