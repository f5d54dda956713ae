// ABOUTME: Translation lookup used by expand_localized
// ABOUTME: Defines resource scopes, the TranslationLookup trait and YAML string catalogs

mod catalog;

pub use catalog::StringCatalog;

use std::fmt;

/// Table consulted when a lookup names none.
pub const DEFAULT_TABLE: &str = "Localizable";

/// Scope consulted when a lookup names none.
pub const DEFAULT_SCOPE: &str = "main";

/// Identifies which collection of tables a lookup searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceScope(String);

impl ResourceScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn main() -> Self {
        Self::new(DEFAULT_SCOPE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ResourceScope {
    fn default() -> Self {
        Self::main()
    }
}

impl From<&str> for ResourceScope {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of translated template strings.
pub trait TranslationLookup: fmt::Debug + Send + Sync {
    /// Translation for `key`, or `None` to fall back to the key itself.
    fn lookup(&self, key: &str, table: Option<&str>, scope: Option<&ResourceScope>) -> Option<String>;
}
