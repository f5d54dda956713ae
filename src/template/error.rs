// ABOUTME: Error types for template expansion and operator pipelines
// ABOUTME: Separates API-boundary failures from per-stage operator failures absorbed during expansion

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid operator name: {0:?}")]
    InvalidOperatorName(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Failed to read string table {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid string table {path}: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid variable set: {0}")]
    InvalidVariables(String),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Failure of a single pipeline stage.
///
/// Never escapes `TemplateEngine::expand`: the engine records it as a
/// diagnostic and continues with the null marker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Operator '{operator}' requires an argument")]
    MissingArgument { operator: String },

    #[error("Invalid argument for '{operator}': {reason}")]
    InvalidArgument { operator: String, reason: String },

    #[error("Operator '{operator}' could not coerce value to {target}")]
    Coercion {
        operator: String,
        target: &'static str,
    },

    #[error("Operator '{operator}' references unknown variable '{name}'")]
    UnknownVariable { operator: String, name: String },

    #[error("Template recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },

    #[error("Operator '{operator}' failed: {message}")]
    Failed { operator: String, message: String },
}

impl OperatorError {
    pub fn missing_argument(operator: &str) -> Self {
        Self::MissingArgument {
            operator: operator.to_string(),
        }
    }

    pub fn invalid_argument(operator: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operator: operator.to_string(),
            reason: reason.into(),
        }
    }

    pub fn coercion(operator: &str, target: &'static str) -> Self {
        Self::Coercion {
            operator: operator.to_string(),
            target,
        }
    }

    pub fn failed(operator: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            operator: operator.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
