// ABOUTME: Command implementations for the templet CLI
// ABOUTME: Handles the expand, check and operators commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::args::Args;
use super::config::Config;
use crate::locale::Locale;
use crate::localize::{ResourceScope, StringCatalog};
use crate::template::{TemplateEngine, VariableSet};

/// Everything `templet expand` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub template: String,
    pub vars: Vec<String>,
    pub positional: Vec<String>,
    pub vars_file: Option<PathBuf>,
    pub tables: Vec<PathBuf>,
    pub table_name: Option<String>,
    pub scope: Option<String>,
    pub localize: bool,
    pub locale: Option<String>,
    pub diagnostics: bool,
}

/// Build an engine from configuration plus command line overrides.
///
/// Command line tables load into `table_name` and `scope`; like configured
/// tables, an unnamed one lands in the default table and scope.
pub fn build_engine(
    config: &Config,
    locale: Option<&str>,
    extra_tables: &[PathBuf],
    table_name: Option<&str>,
    scope: Option<&ResourceScope>,
) -> Result<TemplateEngine> {
    let tag = locale.unwrap_or(&config.locale);
    let locale = Locale::from_tag(tag)?;
    debug!("Using locale {}", tag);

    let mut catalog = StringCatalog::new();
    for source in &config.tables {
        let scope = source.scope.as_deref().map(ResourceScope::new);
        catalog
            .load_file(&source.path, source.table.as_deref(), scope.as_ref())
            .with_context(|| format!("Failed to load configured table {}", source.path.display()))?;
    }
    for path in extra_tables {
        catalog
            .load_file(path, table_name, scope)
            .with_context(|| format!("Failed to load table {}", path.display()))?;
    }

    let mut engine = TemplateEngine::new()
        .with_locale(locale)
        .with_options(config.engine_options());
    if !catalog.is_empty() {
        info!("Loaded {} translations", catalog.len());
        engine = engine.with_translations(catalog);
    }
    Ok(engine)
}

/// Read a JSON or YAML variables file, picking the parser by extension
fn read_variables_file(path: &Path) -> Result<VariableSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read variables file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let variables = if is_yaml {
        let value: serde_json::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?;
        VariableSet::from_json(value)
    } else {
        VariableSet::from_json_str(&content)
    };

    variables.with_context(|| format!("Invalid variables file {}", path.display()))
}

/// Gather variables from a JSON or YAML file, positional values, -V flags and config defaults
pub fn collect_variables(options: &ExpandOptions, config: &Config) -> Result<VariableSet> {
    let mut variables = match &options.vars_file {
        Some(path) => read_variables_file(path)?,
        None => VariableSet::new(),
    };

    for value in &options.positional {
        variables.push(Args::parse_value(value));
    }

    let overrides = Args::parse_variables(&options.vars)?;
    for (name, value) in overrides.iter() {
        variables.insert(name, value.clone());
    }

    for (name, text) in &config.template_vars {
        variables.insert_default(name.as_str(), Args::parse_value(text));
    }

    Ok(variables)
}

/// Expand a template and print it to stdout
pub fn expand_template(options: ExpandOptions, config: &Config) -> Result<()> {
    let scope = options.scope.as_deref().map(ResourceScope::new);
    let engine = build_engine(
        config,
        options.locale.as_deref(),
        &options.tables,
        options.table_name.as_deref(),
        scope.as_ref(),
    )?;
    let variables = collect_variables(&options, config)?;
    info!("Expanding with {} variables", variables.len());

    let template = if options.localize {
        engine
            .localize(&options.template, options.table_name.as_deref(), scope.as_ref())
            .into_owned()
    } else {
        options.template.clone()
    };

    let expansion = engine.expand_with_diagnostics(&template, &variables);
    if options.diagnostics {
        for diagnostic in &expansion.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }
    println!("{}", expansion.text);

    Ok(())
}

/// Report syntax problems in a template
pub fn check_template(template: &str, strict: bool) -> Result<()> {
    let engine = TemplateEngine::new();
    let diagnostics = engine.check(template);

    if diagnostics.is_empty() {
        println!("Template is valid");
        return Ok(());
    }

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }

    if strict {
        return Err(anyhow::anyhow!(
            "Template has {} problem(s)",
            diagnostics.len()
        ));
    }
    Ok(())
}

/// Print every registered operator with its summary
pub fn list_operators() -> Result<()> {
    let engine = TemplateEngine::new();
    let registry = engine.registry();

    for name in registry.list_operators() {
        let description = registry
            .get(name)
            .map(|operator| operator.description())
            .unwrap_or_default();
        println!("{:<18} {}", name, description);
    }
    Ok(())
}
