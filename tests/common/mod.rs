// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides temp environments for tables and configs plus a templet command builder

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use templet::{EngineOptions, TemplateEngine, VariableSet};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Config path that does not exist, so tests never pick up a user config.
    pub fn no_config(&self) -> PathBuf {
        self.path().join("no-config.yaml")
    }

    /// Run the templet binary inside this environment.
    pub fn templet(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_templet"))
            .args(args)
            .current_dir(self.path())
            .env_remove("TEMPLET_LOCALE")
            .env_remove("TEMPLET_MAX_DEPTH")
            .env_remove("TEMPLET_SYNTAX_WARNINGS")
            .env_remove("RUST_LOG")
            .env("TEMPLET_LOG_LEVEL", "error")
            .output()
            .expect("Failed to execute templet")
    }
}

/// Engine with syntax warnings off so test logs stay quiet.
pub fn quiet_engine() -> TemplateEngine {
    TemplateEngine::new().with_options(EngineOptions {
        syntax_warnings: false,
        ..EngineOptions::default()
    })
}

pub fn expand(template: &str, variables: &VariableSet) -> String {
    quiet_engine().expand(template, variables)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());

        let file = env.write_file("table.yaml", "a: b\n");
        assert!(file.exists());
        assert!(!env.no_config().exists());
    }
}
