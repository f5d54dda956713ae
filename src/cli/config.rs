// ABOUTME: Configuration management for the templet application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::template::{EngineOptions, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Log syntax problems at warn level; unset follows the build profile.
    #[serde(default)]
    pub syntax_warnings: Option<bool>,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub tables: Vec<TableSource>,

    #[serde(default)]
    pub template_vars: IndexMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A YAML translation table to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    pub path: PathBuf,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            syntax_warnings: None,
            max_depth: DEFAULT_MAX_DEPTH,
            tables: Vec::new(),
            template_vars: IndexMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let possible_paths = vec![
            PathBuf::from("templet.yaml"),
            PathBuf::from("templet.yml"),
            PathBuf::from(".templet.yaml"),
            PathBuf::from(".templet.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return Ok(path);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".templet").join("config.yaml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Return default path (may not exist)
        Ok(PathBuf::from("templet.yaml"))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(locale) = std::env::var("TEMPLET_LOCALE") {
            self.locale = locale;
        }
        if let Ok(depth) = std::env::var("TEMPLET_MAX_DEPTH") {
            self.max_depth = depth.parse()?;
        }
        if let Ok(warnings) = std::env::var("TEMPLET_SYNTAX_WARNINGS") {
            self.syntax_warnings = Some(warnings.parse()?);
        }

        // Logging configuration
        if let Ok(level) = std::env::var("TEMPLET_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TEMPLET_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Engine options described by this configuration
    pub fn engine_options(&self) -> EngineOptions {
        let defaults = EngineOptions::default();
        EngineOptions {
            syntax_warnings: self.syntax_warnings.unwrap_or(defaults.syntax_warnings),
            max_depth: self.max_depth,
        }
    }
}
