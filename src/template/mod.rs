// ABOUTME: Template module for the templet expansion engine
// ABOUTME: Provides parsing, values, variable sets and the expansion engine

pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod parser;
pub mod split;
pub mod value;

pub use context::VariableSet;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use engine::{EngineOptions, Expansion, TemplateEngine, DEFAULT_MAX_DEPTH};
pub use error::{OperatorError, Result, TemplateError};
pub use parser::{parse, ParsedTemplate, Reference, Segment};
pub use split::{split_arguments, split_balanced, ARGUMENT_SEPARATOR};
pub use value::{Coercible, Number, Value, NULL_MARKER};
