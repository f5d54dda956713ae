// ABOUTME: Tokenizer for template strings with {reference|op:arg|...} substitutions
// ABOUTME: Produces literal and substitution segments, degrading malformed input to literal text

use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::split::split_balanced;

/// Separates the reference from operators, and operators from each other.
pub const PIPE: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> Reference<'a> {
    /// Parse `name`, `0` or `@0`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let digits = text.strip_prefix('@').unwrap_or(text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits.parse().ok().map(Reference::Index);
        }
        if digits.len() != text.len() {
            return None;
        }
        is_identifier(text).then_some(Reference::Name(text))
    }
}

/// Letters, digits and underscores, not starting with a digit.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorCall<'a> {
    pub name: &'a str,
    pub argument: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution<'a> {
    /// The full `{...}` text, emitted verbatim when the reference is unbound.
    pub source: &'a str,
    pub reference: Reference<'a>,
    pub operators: Vec<OperatorCall<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Substitution(Substitution<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ParsedTemplate<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_substitutions(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Substitution(_)))
    }

    pub fn substitutions(&self) -> impl Iterator<Item = &Substitution<'a>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Substitution(substitution) => Some(substitution),
            Segment::Literal(_) => None,
        })
    }
}

/// Tokenize a template.
///
/// Parsing never fails. Malformed substitutions stay in the output as
/// literal text and are described in [`ParsedTemplate::diagnostics`].
pub fn parse(source: &str) -> ParsedTemplate<'_> {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut diagnostics = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while cursor < bytes.len() {
        match bytes[cursor] {
            b'{' => match find_closing(bytes, cursor) {
                Some(close) => {
                    let text = &source[cursor..=close];
                    let body = &source[cursor + 1..close];
                    if let Some(substitution) = parse_substitution(text, body, cursor, &mut diagnostics) {
                        if literal_start < cursor {
                            segments.push(Segment::Literal(&source[literal_start..cursor]));
                        }
                        segments.push(Segment::Substitution(substitution));
                        literal_start = close + 1;
                    }
                    cursor = close + 1;
                }
                None => {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::UnterminatedSubstitution,
                            format!("no closing '}}' for {:?}", &source[cursor..]),
                        )
                        .at(cursor),
                    );
                    cursor = bytes.len();
                }
            },
            b'}' => {
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::UnbalancedBrace, "'}' without matching '{'")
                        .at(cursor),
                );
                cursor += 1;
            }
            _ => cursor += 1,
        }
    }

    if literal_start < source.len() {
        segments.push(Segment::Literal(&source[literal_start..]));
    }

    ParsedTemplate {
        source,
        segments,
        diagnostics,
    }
}

fn find_closing(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_substitution<'a>(
    text: &'a str,
    body: &'a str,
    offset: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Substitution<'a>> {
    let mut parts = split_balanced(body, PIPE).parts.into_iter();
    let reference_text = parts.next().unwrap_or_default();

    let Some(reference) = Reference::parse(reference_text) else {
        let message = if reference_text.chars().any(char::is_whitespace) {
            format!("whitespace is not allowed in reference {:?}", text)
        } else {
            format!("{:?} is not a variable name or index", text)
        };
        diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidReference, message).at(offset));
        return None;
    };

    let mut operators = Vec::new();
    for part in parts {
        let (name, argument) = match part.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (part, None),
        };
        if !is_identifier(name) {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::InvalidOperatorName,
                    format!("invalid operator {:?} in {:?}", name, text),
                )
                .at(offset),
            );
            return None;
        }
        operators.push(OperatorCall { name, argument });
    }

    Some(Substitution {
        source: text,
        reference,
        operators,
    })
}
