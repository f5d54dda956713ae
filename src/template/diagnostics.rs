// ABOUTME: Diagnostics produced while parsing and expanding templates
// ABOUTME: Records syntax warnings and absorbed pipeline failures and forwards them to tracing

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `}` with no matching `{`.
    UnbalancedBrace,
    /// A `{` whose matching `}` never arrives.
    UnterminatedSubstitution,
    /// The reference is neither an identifier nor a positional index.
    InvalidReference,
    InvalidOperatorName,
    UnresolvedReference,
    UnknownOperator,
    OperatorFailed,
    OperatorWarning,
    RecursionLimit,
}

impl DiagnosticKind {
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnbalancedBrace
                | DiagnosticKind::UnterminatedSubstitution
                | DiagnosticKind::InvalidReference
                | DiagnosticKind::InvalidOperatorName
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::UnbalancedBrace => "unbalanced brace",
            DiagnosticKind::UnterminatedSubstitution => "unterminated substitution",
            DiagnosticKind::InvalidReference => "invalid reference",
            DiagnosticKind::InvalidOperatorName => "invalid operator name",
            DiagnosticKind::UnresolvedReference => "unresolved reference",
            DiagnosticKind::UnknownOperator => "unknown operator",
            DiagnosticKind::OperatorFailed => "operator failed",
            DiagnosticKind::OperatorWarning => "operator warning",
            DiagnosticKind::RecursionLimit => "recursion limit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Byte offset into the template the diagnostic was raised for.
    pub offset: Option<usize>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} at byte {}: {}", self.kind.label(), offset, self.message),
            None => write!(f, "{}: {}", self.kind.label(), self.message),
        }
    }
}

/// Collects diagnostics for one expansion call.
#[derive(Debug, Default)]
pub struct Reporter {
    syntax_warnings: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new(syntax_warnings: bool) -> Self {
        Self {
            syntax_warnings,
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::RecursionLimit => warn!("template: {}", diagnostic),
            kind if kind.is_syntax() && self.syntax_warnings => {
                warn!("template syntax: {}", diagnostic)
            }
            _ => debug!("template: {}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(DiagnosticKind::UnbalancedBrace, "stray '}'").at(4);
        assert_eq!(diagnostic.to_string(), "unbalanced brace at byte 4: stray '}'");

        let diagnostic = Diagnostic::new(DiagnosticKind::UnknownOperator, "nosuchop");
        assert_eq!(diagnostic.to_string(), "unknown operator: nosuchop");
    }

    #[test]
    fn test_reporter_collects_in_order() {
        let mut reporter = Reporter::new(false);
        reporter.report(Diagnostic::new(DiagnosticKind::InvalidReference, "first"));
        reporter.report(Diagnostic::new(DiagnosticKind::OperatorFailed, "second"));

        let kinds: Vec<_> = reporter.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::InvalidReference, DiagnosticKind::OperatorFailed]
        );
    }

    #[test]
    fn test_syntax_classification() {
        assert!(DiagnosticKind::UnbalancedBrace.is_syntax());
        assert!(DiagnosticKind::InvalidOperatorName.is_syntax());
        assert!(!DiagnosticKind::UnresolvedReference.is_syntax());
        assert!(!DiagnosticKind::RecursionLimit.is_syntax());
    }
}
