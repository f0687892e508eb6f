//! Configuration for paramcheck runs.
//!
//! This module defines the `Config` struct that controls how parameter files
//! are checked and printed. The configuration can be loaded from a YAML or
//! TOML file, created programmatically, or overridden from command-line
//! arguments.
//!
//! # Examples
//!
//! ```no_run
//! use paramcheck_core::config::{Config, OutputFormat};
//!
//! // Create a new config programmatically
//! let mut config = Config::new();
//! config.resolve_refs = true;
//! config.output_format = OutputFormat::Yaml;
//!
//! // Or load from a config file
//! # async fn load() -> paramcheck_core::Result<()> {
//! let config = Config::from_file("paramcheck.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Output format for re-serialized parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Configuration for paramcheck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolve `$ref` members against the loaded document before validating
    #[serde(default)]
    pub resolve_refs: bool,

    /// Format used when printing parameters
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Vendor extension keys (`x-...`) that must be present on every
    /// resolved parameter
    #[serde(default)]
    pub required_extensions: Vec<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file. `.toml` files are read as TOML,
    /// everything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string(self).map_err(|e| crate::Error::config(e.to_string()))?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the configured extension policy against a collection.
    pub fn check_extensions(&self, parameters: &crate::Parameters) -> crate::Result<()> {
        for param in parameters.resolved() {
            for key in &self.required_extensions {
                if param.extensions.get(key).is_none() {
                    return Err(crate::Error::config(format!(
                        "parameter '{}' is missing required extension '{}'",
                        param.name, key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}
