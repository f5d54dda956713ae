// ABOUTME: In-memory string catalog loaded from YAML translation tables
// ABOUTME: Organises translations by scope, then table name, then key

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{ResourceScope, TranslationLookup, DEFAULT_SCOPE, DEFAULT_TABLE};
use crate::template::error::{Result, TemplateError};

type Table = IndexMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    scopes: HashMap<String, HashMap<String, Table>>,
}

impl StringCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single translation
    pub fn insert(
        &mut self,
        scope: Option<&ResourceScope>,
        table: Option<&str>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.table_mut(scope, table).insert(key.into(), value.into());
    }

    /// Build a catalog from one YAML table
    pub fn from_yaml_str(yaml: &str, table: Option<&str>, scope: Option<&ResourceScope>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.load_yaml_str(yaml, table, scope)?;
        Ok(catalog)
    }

    /// Merge a YAML mapping of key to translation into a table, returning the entry count
    pub fn load_yaml_str(
        &mut self,
        yaml: &str,
        table: Option<&str>,
        scope: Option<&ResourceScope>,
    ) -> Result<usize> {
        let entries: Table = serde_yaml::from_str(yaml)?;
        let count = entries.len();
        self.table_mut(scope, table).extend(entries);
        Ok(count)
    }

    /// Load a YAML table from disk into `table`, or the default table when unnamed.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        table: Option<&str>,
        scope: Option<&ResourceScope>,
    ) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TemplateError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Table =
            serde_yaml::from_str(&content).map_err(|source| TemplateError::CatalogFormat {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Loaded {} translations from {} into table {}",
            entries.len(),
            path.display(),
            table.unwrap_or(DEFAULT_TABLE)
        );

        let count = entries.len();
        self.table_mut(scope, table).extend(entries);
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.scopes
            .values()
            .flat_map(HashMap::values)
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Table names present in a scope, sorted
    pub fn tables(&self, scope: Option<&ResourceScope>) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .scopes
            .get(scope_name(scope))
            .map(|tables| tables.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn table_mut(&mut self, scope: Option<&ResourceScope>, table: Option<&str>) -> &mut Table {
        self.scopes
            .entry(scope_name(scope).to_string())
            .or_default()
            .entry(table.unwrap_or(DEFAULT_TABLE).to_string())
            .or_default()
    }
}

fn scope_name(scope: Option<&ResourceScope>) -> &str {
    scope.map_or(DEFAULT_SCOPE, ResourceScope::as_str)
}

impl TranslationLookup for StringCatalog {
    fn lookup(&self, key: &str, table: Option<&str>, scope: Option<&ResourceScope>) -> Option<String> {
        self.scopes
            .get(scope_name(scope))?
            .get(table.unwrap_or(DEFAULT_TABLE))?
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_table_and_scope() {
        let mut catalog = StringCatalog::new();
        catalog.insert(None, None, "hello", "Bonjour");

        assert_eq!(catalog.lookup("hello", None, None), Some("Bonjour".to_string()));
        assert_eq!(
            catalog.lookup("hello", Some(DEFAULT_TABLE), Some(&ResourceScope::main())),
            Some("Bonjour".to_string())
        );
        assert_eq!(catalog.lookup("hello", Some("Other"), None), None);
    }

    #[test]
    fn test_scopes_are_separate() {
        let plugin = ResourceScope::new("plugin");
        let mut catalog = StringCatalog::new();
        catalog.insert(Some(&plugin), None, "title", "Plugin title");

        assert_eq!(catalog.lookup("title", None, None), None);
        assert_eq!(
            catalog.lookup("title", None, Some(&plugin)),
            Some("Plugin title".to_string())
        );
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
files: "{n|num} file{n|plural:s}"
"greeting {name}": "Hallo {name}"
"#;
        let catalog = StringCatalog::from_yaml_str(yaml, Some("Messages"), None).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tables(None), vec!["Messages"]);
        assert_eq!(
            catalog.lookup("greeting {name}", Some("Messages"), None),
            Some("Hallo {name}".to_string())
        );
    }

    #[test]
    fn test_load_file_table_naming() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Errors.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "missing: \"Datei fehlt\"").unwrap();

        let mut catalog = StringCatalog::new();
        let count = catalog.load_file(&path, None, None).unwrap();
        catalog.load_file(&path, Some("Errors"), None).unwrap();

        assert_eq!(count, 1);
        assert_eq!(catalog.tables(None), vec!["Errors", DEFAULT_TABLE]);
        assert_eq!(
            catalog.lookup("missing", None, None),
            Some("Datei fehlt".to_string())
        );
        assert_eq!(
            catalog.lookup("missing", Some("Errors"), None),
            Some("Datei fehlt".to_string())
        );
    }

    #[test]
    fn test_load_file_errors() {
        let dir = tempdir().unwrap();
        let mut catalog = StringCatalog::new();

        let missing = catalog.load_file(dir.path().join("nope.yaml"), None, None);
        assert!(matches!(missing, Err(TemplateError::CatalogIo { .. })));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "- just\n- a list\n").unwrap();
        let result = catalog.load_file(&bad, None, None);
        assert!(matches!(result, Err(TemplateError::CatalogFormat { .. })));
    }
}
