use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::FuncFilter;

pub const CONFIG_FILE: &str = ".inspect.toml";

/// Top-level configuration from `.inspect.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which directories and files take part in a directory walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Subtree under the walk root that is never descended into. Empty
    /// means none.
    #[serde(default = "default_reserved_dir")]
    pub reserved_dir: String,
    #[serde(default = "default_true")]
    pub ignore_tests: bool,
    /// Glob patterns, relative to the walk root, for files to leave out.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_reserved_dir() -> String {
    "cmd".to_string()
}

fn default_true() -> bool {
    true
}

impl WalkConfig {
    pub fn reserved_dir(&self) -> Option<&str> {
        Some(self.reserved_dir.as_str()).filter(|d| !d.is_empty())
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            reserved_dir: default_reserved_dir(),
            ignore_tests: true,
            exclude_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub funcs: FuncFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Packages dropped from directory-wide reports.
    #[serde(default = "default_omit_packages")]
    pub omit_packages: Vec<String>,
}

fn default_omit_packages() -> Vec<String> {
    vec!["main".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            omit_packages: default_omit_packages(),
        }
    }
}

impl Config {
    /// Load configuration from a `.inspect.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `inspect init` to create a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Load from `.inspect.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!(
                            "failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }

    /// Generate default TOML content for `inspect init`.
    pub fn default_toml() -> String {
        r#"# inspect - Go package metadata extraction

[walk]
# Subtree of the walk root that is skipped entirely (non-library entry points).
# Set to "" to walk every directory.
reserved_dir = "cmd"
# Leave out *_test.go files
ignore_tests = true
# Glob patterns, relative to the walk root, for files to leave out
exclude_patterns = []

[extract]
# Which functions to keep: "exported", "unexported" or "all"
funcs = "exported"

[output]
# Packages dropped from directory-wide reports
omit_packages = ["main"]
"#
        .to_string()
    }
}
