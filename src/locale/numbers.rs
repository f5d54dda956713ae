// ABOUTME: Fixed-point, currency, percent, scientific and byte-count number formatting
// ABOUTME: Renders digits with locale separators shared by all number styles

use super::{spellout, Locale, NumberStyle, SymbolPlacement};
use crate::template::value::Number;

const BYTE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];
const NO_BREAK_SPACE: char = '\u{A0}';

/// Unsigned digits of a number rounded to a fixed fraction length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Digits {
    pub negative: bool,
    pub integer: String,
    pub fraction: String,
}

impl Digits {
    /// `None` for NaN and infinities.
    pub fn fixed(number: Number, min_fraction: usize, max_fraction: usize) -> Option<Self> {
        match number {
            Number::Int(value) => Some(Self {
                negative: value < 0,
                integer: value.unsigned_abs().to_string(),
                fraction: "0".repeat(min_fraction),
            }),
            Number::Float(value) if value.is_finite() => {
                let rendered = format!("{:.*}", max_fraction, value.abs());
                let (integer, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
                let mut fraction = fraction.trim_end_matches('0').to_string();
                while fraction.len() < min_fraction {
                    fraction.push('0');
                }
                let is_zero = integer.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0');
                Some(Self {
                    negative: value.is_sign_negative() && !is_zero,
                    integer: integer.to_string(),
                    fraction,
                })
            }
            Number::Float(_) => None,
        }
    }

    pub fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }
}

impl Locale {
    /// Join digits with this locale's separators. The sign is left to the caller.
    pub(super) fn render_digits(
        &self,
        digits: &Digits,
        min_integer: usize,
        grouping: Option<usize>,
    ) -> String {
        let mut integer = digits.integer.clone();
        if integer.len() < min_integer {
            integer.insert_str(0, &"0".repeat(min_integer - integer.len()));
        }
        if min_integer == 0 && integer.bytes().all(|b| b == b'0') {
            integer.clear();
        }

        let mut rendered = match (grouping, self.grouping_separator) {
            (Some(size), Some(separator)) if size > 0 => group_digits(&integer, separator, size),
            _ => integer,
        };
        if !digits.fraction.is_empty() {
            rendered.push(self.decimal_separator);
            rendered.push_str(&digits.fraction);
        }
        if rendered.is_empty() {
            rendered.push('0');
        }
        rendered
    }
}

fn group_digits(digits: &str, separator: char, size: usize) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / size * separator.len_utf8());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % size == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

pub(super) fn format_number(locale: &Locale, number: Number, style: NumberStyle) -> Option<String> {
    match style {
        NumberStyle::NoLocale => Some(number.to_string()),
        NumberStyle::Decimal => decimal(locale, number),
        NumberStyle::Currency => currency(locale, number),
        NumberStyle::Percent => percent(locale, number),
        NumberStyle::Scientific => scientific(locale, number),
        NumberStyle::SpellOut => spellout::spell_out(number),
        NumberStyle::FileBytes | NumberStyle::DecimalBytes => byte_count(locale, number, 1000),
        NumberStyle::MemoryBytes | NumberStyle::BinaryBytes => byte_count(locale, number, 1024),
    }
}

fn decimal(locale: &Locale, number: Number) -> Option<String> {
    if let Number::Float(value) = number {
        if value.is_nan() {
            return Some("NaN".to_string());
        }
        if value.is_infinite() {
            return Some(if value < 0.0 { "-∞" } else { "∞" }.to_string());
        }
    }
    let digits = Digits::fixed(number, 0, 3)?;
    Some(format!("{}{}", digits.sign(), locale.render_digits(&digits, 1, Some(3))))
}

fn currency(locale: &Locale, number: Number) -> Option<String> {
    let digits = Digits::fixed(number, 2, 2)?;
    let body = locale.render_digits(&digits, 1, Some(3));
    let symbol = &locale.currency_symbol;
    Some(match locale.currency_placement {
        SymbolPlacement::Prefix => format!("{}{}{}", digits.sign(), symbol, body),
        SymbolPlacement::Suffix => format!("{}{}{}{}", digits.sign(), body, NO_BREAK_SPACE, symbol),
    })
}

fn percent(locale: &Locale, number: Number) -> Option<String> {
    let scaled = match number {
        Number::Int(value) => value
            .checked_mul(100)
            .map_or(Number::Float(value as f64 * 100.0), Number::Int),
        Number::Float(value) => Number::Float(value * 100.0),
    };
    let digits = Digits::fixed(scaled, 0, 0)?;
    let body = locale.render_digits(&digits, 1, Some(3));
    Some(if locale.spaced_percent {
        format!("{}{}{}%", digits.sign(), body, NO_BREAK_SPACE)
    } else {
        format!("{}{}%", digits.sign(), body)
    })
}

fn scientific(locale: &Locale, number: Number) -> Option<String> {
    let value = number.as_f64();
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0E0".to_string());
    }

    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value.abs() / 10f64.powi(exponent);
    let mut digits = Digits::fixed(Number::Float(mantissa), 0, 6)?;
    if digits.integer == "10" {
        exponent += 1;
        mantissa /= 10.0;
        digits = Digits::fixed(Number::Float(mantissa), 0, 6)?;
    }

    let sign = if value < 0.0 { "-" } else { "" };
    Some(format!("{}{}E{}", sign, locale.render_digits(&digits, 1, None), exponent))
}

fn byte_count(locale: &Locale, number: Number, base: u64) -> Option<String> {
    let bytes = number.truncate()?;
    if bytes == 0 {
        return Some("Zero KB".to_string());
    }

    let magnitude = bytes.unsigned_abs();
    if magnitude < base {
        let digits = Digits::fixed(Number::Int(bytes), 0, 0)?;
        let unit = if magnitude == 1 { "byte" } else { "bytes" };
        return Some(format!(
            "{}{} {}",
            digits.sign(),
            locale.render_digits(&digits, 1, Some(3)),
            unit
        ));
    }

    let base = base as f64;
    let mut scaled = magnitude as f64 / base;
    let mut unit = 0;
    while scaled >= base && unit < BYTE_UNITS.len() - 1 {
        scaled /= base;
        unit += 1;
    }
    let fraction = match unit {
        0 => 0,
        1 => 1,
        _ => 2,
    };
    let digits = Digits::fixed(Number::Float(scaled), 0, fraction)?;
    let sign = if bytes < 0 { "-" } else { "" };
    Some(format!(
        "{}{} {}",
        sign,
        locale.render_digits(&digits, 1, Some(3)),
        BYTE_UNITS[unit]
    ))
}
