// ABOUTME: Main library module for the templet string template engine
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod locale;
pub mod localize;
pub mod operators;
pub mod template;

// Re-export commonly used types
pub use locale::{FoldOptions, Locale, LocaleFormatter, NumberStyle};
pub use localize::{ResourceScope, StringCatalog, TranslationLookup};
pub use operators::{Operator, OperatorContext, OperatorRegistry, OperatorResult};
pub use template::{
    Coercible, Diagnostic, DiagnosticKind, EngineOptions, Expansion, Number, OperatorError,
    TemplateEngine, TemplateError, Value, VariableSet,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
