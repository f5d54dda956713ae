// ABOUTME: Custom number patterns such as "#,##0.00" or "'¤'0.0%"
// ABOUTME: Supports a subset of the Unicode decimal pattern syntax with quoted literals

use super::numbers::Digits;
use super::Locale;
use crate::template::value::Number;

const CURRENCY_SIGN: char = '¤';

/// One pattern character and whether it was quoted.
type PatternChar = (char, bool);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    prefix: Vec<PatternChar>,
    suffix: Vec<PatternChar>,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    grouping: Option<usize>,
    multiplier: i64,
}

impl Pattern {
    /// Parse the positive subpattern; anything after an unquoted `;` is ignored.
    fn parse(source: &str) -> Option<Self> {
        let mut chars: Vec<PatternChar> = Vec::new();
        let mut quoted = false;
        let mut iter = source.chars().peekable();
        while let Some(ch) = iter.next() {
            if ch == '\'' {
                if iter.peek() == Some(&'\'') {
                    iter.next();
                    chars.push(('\'', true));
                } else {
                    quoted = !quoted;
                }
                continue;
            }
            if ch == ';' && !quoted {
                break;
            }
            chars.push((ch, quoted));
        }

        let is_numeric = |&(ch, quoted): &PatternChar| !quoted && matches!(ch, '#' | '0' | ',' | '.');
        let start = chars.iter().position(is_numeric)?;
        let end = chars[start..]
            .iter()
            .position(|c| !is_numeric(c))
            .map_or(chars.len(), |offset| start + offset);

        let body: String = chars[start..end].iter().map(|&(ch, _)| ch).collect();
        if !body.contains(['#', '0']) {
            return None;
        }
        let (integer, fraction) = body.split_once('.').unwrap_or((&body, ""));
        if fraction.contains(['.', ',']) {
            return None;
        }

        let prefix = chars[..start].to_vec();
        let suffix = chars[end..].to_vec();
        let affixes = || prefix.iter().chain(suffix.iter()).filter(|&&(_, quoted)| !quoted);
        let multiplier = if affixes().any(|&(ch, _)| ch == '%') {
            100
        } else if affixes().any(|&(ch, _)| ch == '‰') {
            1000
        } else {
            1
        };

        Some(Self {
            min_integer: integer.matches('0').count(),
            grouping: integer
                .rfind(',')
                .map(|comma| integer[comma + 1..].matches(['#', '0']).count())
                .filter(|&size| size > 0),
            min_fraction: fraction.matches('0').count(),
            max_fraction: fraction.matches(['#', '0']).count(),
            prefix,
            suffix,
            multiplier,
        })
    }
}

fn render_affix(affix: &[PatternChar], locale: &Locale) -> String {
    let mut rendered = String::new();
    for &(ch, quoted) in affix {
        if ch == CURRENCY_SIGN && !quoted {
            rendered.push_str(locale.currency_symbol());
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

pub(super) fn format_pattern(locale: &Locale, number: Number, source: &str) -> Option<String> {
    let pattern = Pattern::parse(source)?;
    let scaled = match number {
        Number::Int(value) => value
            .checked_mul(pattern.multiplier)
            .map_or(Number::Float(value as f64 * pattern.multiplier as f64), Number::Int),
        Number::Float(value) => Number::Float(value * pattern.multiplier as f64),
    };
    let digits = Digits::fixed(scaled, pattern.min_fraction, pattern.max_fraction)?;

    Some(format!(
        "{}{}{}{}",
        digits.sign(),
        render_affix(&pattern.prefix, locale),
        locale.render_digits(&digits, pattern.min_integer, pattern.grouping),
        render_affix(&pattern.suffix, locale)
    ))
}
