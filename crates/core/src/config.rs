//! Configuration file support.
//!
//! Every policy knob of the pipeline (selector cascade, UI-noise vocabulary,
//! thresholds, decoration pools, recognised document hosts) can be supplied
//! as JSON. Missing fields keep their defaults, so a file only needs to list
//! what it changes:
//!
//! ```json
//! {
//!   "min_usable_length": 20,
//!   "extract": { "noise": { "patterns": ["Share", "Last modified"] } }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decoration::DecorationSet;
use crate::extract::{DEFAULT_MIN_USABLE_LENGTH, ExtractConfig};
use crate::pipeline::DEFAULT_DOCUMENT_HOSTS;
use crate::{PostcraftError, Result};

/// File name looked up inside the standard config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostcraftConfig {
    /// Selector cascade and noise filter
    pub extract: ExtractConfig,
    /// Decoration pools and closing templates
    pub decorations: DecorationSet,
    /// Extractions shorter than this are rejected by the converter
    pub min_usable_length: usize,
    /// Hosts recognised as document pages
    pub document_hosts: Vec<String>,
}

impl Default for PostcraftConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            decorations: DecorationSet::default(),
            min_usable_length: DEFAULT_MIN_USABLE_LENGTH,
            document_hosts: DEFAULT_DOCUMENT_HOSTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PostcraftConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PostcraftError::FileNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| match e {
            PostcraftError::ConfigError(msg) => PostcraftError::ConfigError(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Rejects policies the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extract.selectors.iter().any(|rule| rule.selector.trim().is_empty()) {
            return Err(PostcraftError::ConfigError("selector cascade contains an empty selector".to_string()));
        }
        self.decorations.validate()
    }
}

/// Locates and loads the configuration file
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit config file path
    custom_path: Option<PathBuf>,
    /// Standard config directory path
    standard_dir: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader using the platform config directory
    pub fn new() -> Self {
        Self { custom_path: None, standard_dir: dirs::config_dir().map(|dir| dir.join("postcraft")) }
    }

    /// Use an explicit configuration file
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_path = Some(path.into());
        self
    }

    /// Override the standard config directory
    pub fn with_standard_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.standard_dir = dir;
        self
    }

    /// The file `load` would read, if any
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.custom_path {
            return Some(path.clone());
        }
        self.standard_dir
            .as_ref()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, the standard location is
    /// used when present and the defaults otherwise.
    pub fn load(&self) -> Result<PostcraftConfig> {
        match self.resolve() {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                PostcraftConfig::from_file(&path)
            }
            None => {
                debug!("no configuration file, using defaults");
                Ok(PostcraftConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PostcraftConfig::from_json(r#"{ "min_usable_length": 20 }"#).unwrap();

        assert_eq!(config.min_usable_length, 20);
        assert_eq!(config.extract, ExtractConfig::default());
        assert_eq!(config.decorations, DecorationSet::default());
        assert_eq!(config.document_hosts.len(), 4);
    }

    #[test]
    fn test_selector_rule_default_threshold() {
        let json = r#"{ "extract": { "selectors": [ { "selector": ".post" }, { "selector": "main", "min_length": 5 } ] } }"#;
        let config = PostcraftConfig::from_json(json).unwrap();

        assert_eq!(config.extract.selectors[0].min_length, 50);
        assert_eq!(config.extract.selectors[1].min_length, 5);
        assert_eq!(config.extract.fallback_label, "body (fallback)");
    }

    #[test]
    fn test_invalid_decorations_rejected() {
        let json = r#"{ "decorations": { "title": ["*"], "section": ["*"] } }"#;
        assert!(matches!(PostcraftConfig::from_json(json), Err(PostcraftError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(PostcraftConfig::from_json("{ nope"), Err(PostcraftError::ConfigError(_))));
    }

    #[test]
    fn test_loader_explicit_missing_file() {
        let tmp = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_path(tmp.path().join("missing.json"));

        assert!(matches!(loader.load(), Err(PostcraftError::FileNotFound(_))));
    }

    #[test]
    fn test_loader_standard_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), r#"{ "min_usable_length": 42 }"#).unwrap();
        let loader = ConfigLoader::new().with_standard_dir(Some(tmp.path().to_path_buf()));

        assert_eq!(loader.load().unwrap().min_usable_length, 42);
    }

    #[test]
    fn test_loader_defaults_without_file() {
        let tmp = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_standard_dir(Some(tmp.path().to_path_buf()));

        assert_eq!(loader.resolve(), None);
        assert_eq!(loader.load().unwrap(), PostcraftConfig::default());
    }
}
