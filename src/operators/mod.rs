// ABOUTME: Operator trait, per-call context, and the registry mapping names to operators
// ABOUTME: Registers the built-in numeric, choice, text and debug operators

pub mod choice;
pub mod debug;
pub mod numeric;
pub mod plural_rules;
pub mod text;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::locale::LocaleFormatter;
use crate::template::context::VariableSet;
use crate::template::diagnostics::{Diagnostic, DiagnosticKind, Reporter};
use crate::template::engine::TemplateEngine;
use crate::template::error::{OperatorError, Result, TemplateError};
use crate::template::parser::is_identifier;
use crate::template::split::{split_balanced, ARGUMENT_SEPARATOR};
use crate::template::value::{Number, Value};

pub type OperatorResult = std::result::Result<Value, OperatorError>;

/// A named transformation applied in a substitution pipeline.
pub trait Operator: Send + Sync {
    fn name(&self) -> &str;

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult;

    /// One-line summary shown by `templet operators`.
    fn description(&self) -> &str {
        ""
    }
}

/// What an operator can reach while it runs.
pub struct OperatorContext<'a> {
    engine: &'a TemplateEngine,
    variables: &'a VariableSet,
    depth: usize,
    reporter: &'a mut Reporter,
}

impl<'a> OperatorContext<'a> {
    pub(crate) fn new(
        engine: &'a TemplateEngine,
        variables: &'a VariableSet,
        depth: usize,
        reporter: &'a mut Reporter,
    ) -> Self {
        Self {
            engine,
            variables,
            depth,
            reporter,
        }
    }

    pub fn variables(&self) -> &VariableSet {
        self.variables
    }

    pub fn locale(&self) -> &dyn LocaleFormatter {
        self.engine.locale()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Expand a template fragment with the same variables, one level deeper.
    pub fn expand(&mut self, template: &str) -> std::result::Result<String, OperatorError> {
        let depth = self.depth + 1;
        let limit = self.engine.options().max_depth;
        if depth > limit {
            self.reporter.report(Diagnostic::new(
                DiagnosticKind::RecursionLimit,
                format!("not expanding {:?} beyond depth {}", template, limit),
            ));
            return Err(OperatorError::RecursionLimit { limit });
        }
        Ok(self
            .engine
            .expand_nested(template, self.variables, depth, self.reporter))
    }

    /// Split an argument on top-level `;`, reporting unbalanced braces.
    pub fn split_arguments<'s>(&mut self, argument: &'s str) -> Vec<&'s str> {
        let split = split_balanced(argument, ARGUMENT_SEPARATOR);
        for offset in split.unbalanced {
            self.reporter.report(
                Diagnostic::new(
                    DiagnosticKind::UnbalancedBrace,
                    format!("'}}' without matching '{{' in argument {:?}", argument),
                )
                .at(offset),
            );
        }
        split.parts
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.reporter
            .report(Diagnostic::new(DiagnosticKind::OperatorWarning, message));
    }

    pub fn string(&self, value: &Value, operator: &str) -> std::result::Result<String, OperatorError> {
        value
            .to_template_string(self.locale())
            .ok_or_else(|| OperatorError::coercion(operator, "string"))
    }

    pub fn number(&self, value: &Value, operator: &str) -> std::result::Result<Number, OperatorError> {
        value
            .to_number()
            .ok_or_else(|| OperatorError::coercion(operator, "number"))
    }

    pub fn boolean(&self, value: &Value, operator: &str) -> std::result::Result<bool, OperatorError> {
        value
            .to_boolean()
            .ok_or_else(|| OperatorError::coercion(operator, "boolean"))
    }
}

struct FnOperator<F> {
    name: String,
    function: F,
}

impl<F> Operator for FnOperator<F>
where
    F: Fn(&Value, Option<&str>, &mut OperatorContext<'_>) -> OperatorResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &self,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        (self.function)(value, argument, context)
    }
}

#[derive(Clone, Default)]
pub struct OperatorRegistry {
    operators: HashMap<String, Arc<dyn Operator>>,
}

impl OperatorRegistry {
    /// Registry holding every built-in operator
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.insert(Arc::new(numeric::NumOperator));
        registry.insert(Arc::new(numeric::RoundOperator));
        registry.insert(Arc::new(choice::PluralOperator::PLURAL));
        registry.insert(Arc::new(choice::PluralOperator::PLURAZ));
        registry.insert(Arc::new(choice::PlurOperator));
        registry.insert(Arc::new(choice::IfOperator));
        registry.insert(Arc::new(choice::IfUseOperator));
        registry.insert(Arc::new(choice::SelectOperator));
        registry.insert(Arc::new(choice::NotOperator));
        for operator in text::CaseOperator::ALL {
            registry.insert(Arc::new(operator));
        }
        registry.insert(Arc::new(text::TrimOperator));
        registry.insert(Arc::new(text::LengthOperator));
        registry.insert(Arc::new(text::FoldOperator));
        registry.insert(Arc::new(debug::PointerOperator));
        registry.insert(Arc::new(debug::BaseDescriptionOperator));
        registry.insert(Arc::new(debug::DebugDescriptionOperator));

        registry
    }

    /// Registry with no operators at all
    pub fn empty() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    fn insert(&mut self, operator: Arc<dyn Operator>) -> Option<Arc<dyn Operator>> {
        self.operators.insert(operator.name().to_string(), operator)
    }

    /// Register an operator, returning the one it replaced
    pub fn register(&mut self, operator: impl Operator + 'static) -> Result<Option<Arc<dyn Operator>>> {
        self.register_shared(Arc::new(operator))
    }

    pub fn register_shared(&mut self, operator: Arc<dyn Operator>) -> Result<Option<Arc<dyn Operator>>> {
        let name = operator.name();
        if !is_identifier(name) {
            return Err(TemplateError::InvalidOperatorName(name.to_string()));
        }
        let replaced = self.insert(operator);
        if let Some(previous) = &replaced {
            warn!("Operator '{}' replaced by a new registration", previous.name());
        }
        Ok(replaced)
    }

    /// Register a closure under `name`
    pub fn register_fn<F>(&mut self, name: &str, function: F) -> Result<Option<Arc<dyn Operator>>>
    where
        F: Fn(&Value, Option<&str>, &mut OperatorContext<'_>) -> OperatorResult
            + Send
            + Sync
            + 'static,
    {
        self.register(FnOperator {
            name: name.to_string(),
            function,
        })
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.operators.get(name).map(|operator| operator.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Apply the operator called `name`
    pub fn apply(
        &self,
        name: &str,
        value: &Value,
        argument: Option<&str>,
        context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        match self.get(name) {
            Some(operator) => operator.apply(value, argument, context),
            None => Err(OperatorError::UnknownOperator(name.to_string())),
        }
    }

    /// Operator names in sorted order
    pub fn list_operators(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operators.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.list_operators())
            .finish()
    }
}
