// ABOUTME: Brace-aware splitting of template bodies and operator arguments
// ABOUTME: Splits on a separator only outside of nested {...} groups, preserving empty segments

use tracing::warn;

/// Separator operators use between their sub-arguments.
pub const ARGUMENT_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    pub parts: Vec<&'a str>,
    /// Byte offsets of `}` characters that closed nothing.
    pub unbalanced: Vec<usize>,
}

/// Split `input` on top-level occurrences of `separator`.
///
/// Only `{` and `}` nest. A `}` at depth zero is kept as an ordinary
/// character and its offset recorded in [`Split::unbalanced`].
pub fn split_balanced(input: &str, separator: char) -> Split<'_> {
    debug_assert!(separator != '{' && separator != '}');

    let mut parts = Vec::new();
    let mut unbalanced = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in input.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '}' => unbalanced.push(index),
            c if c == separator && depth == 0 => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    Split { parts, unbalanced }
}

/// Split an operator argument, logging a warning for each unbalanced `}`.
pub fn split_arguments(input: &str, separator: char) -> Vec<&str> {
    let split = split_balanced(input, separator);
    for offset in &split.unbalanced {
        warn!("Unbalanced '}}' at byte {} in argument {:?}", offset, input);
    }
    split.parts
}
