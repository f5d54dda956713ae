// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the templet CLI structure, subcommands and typed -V variables

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::template::{Value, VariableSet};

#[derive(Parser)]
#[command(name = "templet")]
#[command(about = "Expand localizable string templates with named substitutions and operators")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a template and print the result
    Expand {
        #[arg(help = "Template text, or the key to translate with --localize")]
        template: String,

        #[arg(short = 'V', long = "var", help = "Template variable (name=value)")]
        vars: Vec<String>,

        #[arg(short, long = "positional", help = "Positional argument for {0}, {1}, ...")]
        positional: Vec<String>,

        #[arg(long, help = "JSON or YAML file with an object of variables or an array of arguments")]
        vars_file: Option<PathBuf>,

        #[arg(short, long, help = "YAML translation table to load (repeatable)")]
        table: Vec<PathBuf>,

        #[arg(
            long,
            requires = "localize",
            help = "Table to load --table files into and look the template key up in"
        )]
        table_name: Option<String>,

        #[arg(
            long,
            requires = "localize",
            help = "Resource scope to load --table files into and look the template key up in"
        )]
        scope: Option<String>,

        #[arg(long, help = "Translate the template through the loaded tables first")]
        localize: bool,

        #[arg(long, help = "Locale tag such as en-US or de-DE")]
        locale: Option<String>,

        #[arg(long, help = "Print diagnostics to stderr")]
        diagnostics: bool,
    },

    /// Check template syntax without expanding
    Check {
        #[arg(help = "Template text to check")]
        template: String,

        #[arg(long, help = "Exit with an error when any problem is found")]
        strict: bool,
    },

    /// List the available operators
    Operators,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from name=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<VariableSet> {
        let mut variables = VariableSet::new();

        for var in vars {
            if let Some((name, value)) = var.split_once('=') {
                variables.insert(name, Self::parse_value(value));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'name=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }

    /// Infer a value's type from its command line spelling
    pub fn parse_value(text: &str) -> Value {
        match text {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ => {
                if let Ok(int) = text.parse::<i64>() {
                    Value::Int(int)
                } else if let Some(float) = text.parse::<f64>().ok().filter(|f| f.is_finite()) {
                    Value::Float(float)
                } else {
                    Value::from(text)
                }
            }
        }
    }
}
