// ABOUTME: Diagnostic operators exposing value identity and debug descriptions
// ABOUTME: Provides pointer, basedesc and debugdesc for troubleshooting templates

use std::sync::Arc;

use super::{Operator, OperatorContext, OperatorResult};
use crate::template::value::Value;

/// Address identifying the value. Null is always zero.
fn address(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Str(text) => text.as_ptr() as usize,
        Value::Custom(custom) => Arc::as_ptr(custom) as *const () as usize,
        other => other as *const Value as usize,
    }
}

pub struct PointerOperator;

impl Operator for PointerOperator {
    fn name(&self) -> &str {
        "pointer"
    }

    fn description(&self) -> &str {
        "Address of the value in hexadecimal"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        _context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        Ok(Value::Str(format!("{:#x}", address(value))))
    }
}

pub struct BaseDescriptionOperator;

impl Operator for BaseDescriptionOperator {
    fn name(&self) -> &str {
        "basedesc"
    }

    fn description(&self) -> &str {
        "Type name and address, ignoring custom descriptions"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        _context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        Ok(Value::Str(format!(
            "<{}: {:#x}>",
            value.type_name(),
            address(value)
        )))
    }
}

pub struct DebugDescriptionOperator;

impl Operator for DebugDescriptionOperator {
    fn name(&self) -> &str {
        "debugdesc"
    }

    fn description(&self) -> &str {
        "Debug description of the value"
    }

    fn apply(
        &self,
        value: &Value,
        _argument: Option<&str>,
        _context: &mut OperatorContext<'_>,
    ) -> OperatorResult {
        Ok(Value::Str(value.debug_description()))
    }
}
