// ABOUTME: Variable sets supplying values to template substitutions
// ABOUTME: Holds named variables plus positional arguments addressed as {0} or {@0}

use indexmap::IndexMap;
use std::collections::BTreeMap;

use super::error::{Result, TemplateError};
use super::parser::Reference;
use super::value::Value;

/// Values available to a template expansion.
///
/// Named variables also occupy the next positional slot, so `{0}` refers
/// to the first variable added. Explicit positional parameters set with
/// [`VariableSet::insert_index`] take precedence over that implicit order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSet {
    arguments: Vec<Value>,
    names: IndexMap<String, usize>,
    indexed: BTreeMap<usize, Value>,
}

impl VariableSet {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`VariableSet::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`VariableSet::push`]
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Add or replace a named variable
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.names.get(&name) {
            Some(&slot) => self.arguments[slot] = value,
            None => {
                self.names.insert(name, self.arguments.len());
                self.arguments.push(value);
            }
        }
    }

    /// Insert a named variable only when the name is not yet bound
    pub fn insert_default(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if !self.names.contains_key(&name) {
            self.insert(name, value);
        }
    }

    /// Append an unnamed positional argument, returning its index
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.arguments.push(value.into());
        self.arguments.len() - 1
    }

    /// Bind an explicit positional parameter
    pub fn insert_index(&mut self, index: usize, value: impl Into<Value>) {
        self.indexed.insert(index, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name).map(|&slot| &self.arguments[slot])
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.indexed
            .get(&index)
            .or_else(|| self.arguments.get(index))
    }

    pub fn resolve(&self, reference: &Reference<'_>) -> Option<&Value> {
        match reference {
            Reference::Name(name) => self.get(name),
            Reference::Index(index) => self.get_index(*index),
        }
    }

    /// Look up a key written the way a template writes references.
    pub fn lookup_key(&self, key: &str) -> Option<&Value> {
        Reference::parse(key).and_then(|reference| self.resolve(&reference))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Named variables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names
            .iter()
            .map(|(name, &slot)| (name.as_str(), &self.arguments[slot]))
    }

    pub fn len(&self) -> usize {
        self.arguments.len().max(
            self.indexed
                .keys()
                .next_back()
                .map_or(0, |last| last + 1),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.indexed.is_empty()
    }

    /// Build a variable set from a JSON object (named) or array (positional)
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            serde_json::Value::Array(items) => {
                let mut variables = Self::new();
                for item in items {
                    variables.push(item);
                }
                Ok(variables)
            }
            other => Err(TemplateError::InvalidVariables(format!(
                "expected an object or array, found {}",
                other
            ))),
        }
    }

    /// Parse a JSON document into a variable set
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VariableSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        variables.extend(iter);
        variables
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for VariableSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Build a [`VariableSet`] from local bindings.
///
/// `vars![count, name = "Ada"]` binds `count` from the variable of the same
/// name and `name` from the expression. Order defines positional indices.
#[macro_export]
macro_rules! vars {
    () => {
        $crate::VariableSet::new()
    };
    (@value $name:ident) => {
        $crate::Value::from(::std::clone::Clone::clone(&$name))
    };
    (@value $name:ident, $value:expr) => {
        $crate::Value::from($value)
    };
    ($($name:ident $(= $value:expr)?),+ $(,)?) => {{
        let mut variables = $crate::VariableSet::new();
        $(
            variables.insert(stringify!($name), $crate::vars!(@value $name $(, $value)?));
        )+
        variables
    }};
}
