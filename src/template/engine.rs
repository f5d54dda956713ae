// ABOUTME: Expansion engine that resolves substitutions and runs operator pipelines
// ABOUTME: Provides expand, expand_localized and diagnostics-returning variants

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::context::VariableSet;
use super::diagnostics::{Diagnostic, DiagnosticKind, Reporter};
use super::error::{OperatorError, Result};
use super::parser::{self, OperatorCall, ParsedTemplate, Segment, Substitution};
use super::value::Value;
use crate::locale::{Locale, LocaleFormatter};
use crate::localize::{ResourceScope, TranslationLookup};
use crate::operators::{Operator, OperatorContext, OperatorRegistry, OperatorResult};

/// Nested expansions allowed below a top-level template.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Log syntax problems at warn level instead of debug.
    pub syntax_warnings: bool,
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            syntax_warnings: cfg!(debug_assertions),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of an expansion together with what went wrong along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind.is_syntax())
    }
}

#[derive(Clone)]
pub struct TemplateEngine {
    registry: Arc<OperatorRegistry>,
    locale: Arc<dyn LocaleFormatter>,
    translations: Option<Arc<dyn TranslationLookup>>,
    options: EngineOptions,
}

impl TemplateEngine {
    /// Create a new engine with all built-in operators and the default locale
    pub fn new() -> Self {
        Self::with_registry(OperatorRegistry::new())
    }

    /// Create an engine dispatching to the given registry
    pub fn with_registry(registry: OperatorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            locale: Arc::new(Locale::default()),
            translations: None,
            options: EngineOptions::default(),
        }
    }

    pub fn with_locale(mut self, locale: impl LocaleFormatter + 'static) -> Self {
        self.locale = Arc::new(locale);
        self
    }

    pub fn with_translations(mut self, translations: impl TranslationLookup + 'static) -> Self {
        self.translations = Some(Arc::new(translations));
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Create an engine with additional operators
    pub fn with_custom_operators<F>(mut self, register_fn: F) -> Result<Self>
    where
        F: FnOnce(&mut OperatorRegistry) -> Result<()>,
    {
        register_fn(Arc::make_mut(&mut self.registry))?;
        Ok(self)
    }

    /// Register an operator, replacing any existing one with the same name
    pub fn register_operator(
        &mut self,
        operator: impl Operator + 'static,
    ) -> Result<Option<Arc<dyn Operator>>> {
        Arc::make_mut(&mut self.registry).register(operator)
    }

    /// Register a closure as an operator
    pub fn register_fn<F>(&mut self, name: &str, function: F) -> Result<Option<Arc<dyn Operator>>>
    where
        F: Fn(&Value, Option<&str>, &mut OperatorContext<'_>) -> OperatorResult
            + Send
            + Sync
            + 'static,
    {
        Arc::make_mut(&mut self.registry).register_fn(name, function)
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn locale(&self) -> &dyn LocaleFormatter {
        self.locale.as_ref()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Expand a template against a variable set
    pub fn expand(&self, template: &str, variables: &VariableSet) -> String {
        self.expand_with_diagnostics(template, variables).text
    }

    /// Expand a template and return the diagnostics collected on the way
    pub fn expand_with_diagnostics(&self, template: &str, variables: &VariableSet) -> Expansion {
        self.render(&self.compile(template), variables)
    }

    /// Translate a template key, then expand the result
    pub fn expand_localized(
        &self,
        key: &str,
        table: Option<&str>,
        scope: Option<&ResourceScope>,
        variables: &VariableSet,
    ) -> String {
        let template = self.localize(key, table, scope);
        self.expand(&template, variables)
    }

    /// Translation of `key`, or the key itself when no translation exists
    pub fn localize<'a>(
        &self,
        key: &'a str,
        table: Option<&str>,
        scope: Option<&ResourceScope>,
    ) -> Cow<'a, str> {
        match self
            .translations
            .as_ref()
            .and_then(|translations| translations.lookup(key, table, scope))
        {
            Some(translated) => Cow::Owned(translated),
            None => Cow::Borrowed(key),
        }
    }

    /// Append an expansion to an existing buffer
    pub fn append(&self, buffer: &mut String, template: &str, variables: &VariableSet) {
        buffer.push_str(&self.expand(template, variables));
    }

    /// Append a localized expansion to an existing buffer
    pub fn append_localized(
        &self,
        buffer: &mut String,
        key: &str,
        table: Option<&str>,
        scope: Option<&ResourceScope>,
        variables: &VariableSet,
    ) {
        buffer.push_str(&self.expand_localized(key, table, scope, variables));
    }

    /// Parse a template once for repeated rendering
    pub fn compile<'a>(&self, template: &'a str) -> ParsedTemplate<'a> {
        parser::parse(template)
    }

    /// Render a compiled template
    pub fn render(&self, parsed: &ParsedTemplate<'_>, variables: &VariableSet) -> Expansion {
        let mut reporter = Reporter::new(self.options.syntax_warnings);
        let text = self.render_segments(parsed, variables, 0, &mut reporter);
        Expansion {
            text,
            diagnostics: reporter.into_diagnostics(),
        }
    }

    /// Syntax diagnostics for a template, without expanding it
    pub fn check(&self, template: &str) -> Vec<Diagnostic> {
        parser::parse(template).diagnostics().to_vec()
    }

    pub(crate) fn expand_nested(
        &self,
        template: &str,
        variables: &VariableSet,
        depth: usize,
        reporter: &mut Reporter,
    ) -> String {
        let parsed = parser::parse(template);
        self.render_segments(&parsed, variables, depth, reporter)
    }

    fn render_segments(
        &self,
        parsed: &ParsedTemplate<'_>,
        variables: &VariableSet,
        depth: usize,
        reporter: &mut Reporter,
    ) -> String {
        for diagnostic in parsed.diagnostics() {
            reporter.report(diagnostic.clone());
        }

        let mut output = String::with_capacity(parsed.source().len());
        for segment in parsed.segments() {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Substitution(substitution) => {
                    self.substitute(substitution, variables, depth, reporter, &mut output)
                }
            }
        }
        output
    }

    fn substitute(
        &self,
        substitution: &Substitution<'_>,
        variables: &VariableSet,
        depth: usize,
        reporter: &mut Reporter,
        output: &mut String,
    ) {
        let Some(initial) = variables.resolve(&substitution.reference) else {
            reporter.report(Diagnostic::new(
                DiagnosticKind::UnresolvedReference,
                format!("no variable for {}", substitution.source),
            ));
            output.push_str(substitution.source);
            return;
        };

        let mut value = initial.clone();
        for call in &substitution.operators {
            value = self.apply_operator(call, &value, variables, depth, reporter);
        }
        output.push_str(&value.render(self.locale()));
    }

    fn apply_operator(
        &self,
        call: &OperatorCall<'_>,
        value: &Value,
        variables: &VariableSet,
        depth: usize,
        reporter: &mut Reporter,
    ) -> Value {
        let mut context = OperatorContext::new(self, variables, depth, reporter);
        let error = match self.registry.apply(call.name, value, call.argument, &mut context) {
            Ok(result) => return result,
            Err(error) => error,
        };

        let diagnostic = match error {
            OperatorError::UnknownOperator(name) => Diagnostic::new(
                DiagnosticKind::UnknownOperator,
                format!("no operator named '{}'", name),
            ),
            error => Diagnostic::new(DiagnosticKind::OperatorFailed, error.to_string()),
        };
        reporter.report(diagnostic);
        Value::Null
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("operators", &self.registry.len())
            .field("locale", &self.locale.tag())
            .field("translations", &self.translations.is_some())
            .field("options", &self.options)
            .finish()
    }
}
