//! Knowledge Hooks configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Knowledge Hooks configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Memory store dispatch configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Insight extraction thresholds
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl HooksConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// Load from an optional path, falling back to defaults when the path is
    /// absent or unusable. Hooks must keep running with a broken config file.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Using default configuration");
                Self::default()
            }
        }
    }
}

/// Memory store dispatch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Marker file, relative to the project directory, whose presence means
    /// the memory store has been initialized for this project
    pub marker_path: PathBuf,

    /// Store executable: a bare name is looked up on PATH, anything with a
    /// path separator is used as-is
    pub executable: String,

    /// Extra arguments passed to the executable
    pub args: Vec<String>,

    /// Prefix prepended to every operation name on the wire
    pub tool_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            marker_path: PathBuf::from(".claude").join("db").join("ccmem.sqlite"),
            executable: "ccmem".to_string(),
            args: Vec::new(),
            tool_prefix: "ccmem_".to_string(),
        }
    }
}

/// Thresholds for assistant-response extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Responses shorter than this many characters are ignored
    pub min_text_len: usize,

    /// Responses longer than this many characters may produce a
    /// "Development Insights" summary
    pub detailed_text_len: usize,

    /// Minimum insight count for the "Development Insights" summary
    pub min_detailed_insights: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_len: 100,
            detailed_text_len: 500,
            min_detailed_insights: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HooksConfig::default();
        assert_eq!(config.dispatch.executable, "ccmem");
        assert_eq!(config.dispatch.tool_prefix, "ccmem_");
        assert_eq!(
            config.dispatch.marker_path,
            PathBuf::from(".claude/db/ccmem.sqlite")
        );
        assert_eq!(config.extraction.min_text_len, 100);
        assert_eq!(config.extraction.detailed_text_len, 500);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HooksConfig::from_toml(
            r#"
            [dispatch]
            executable = "/opt/store/bin/ccmem"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch.executable, "/opt/store/bin/ccmem");
        assert_eq!(config.dispatch.tool_prefix, "ccmem_");
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = HooksConfig::from_toml("[dispatch\nexecutable = 3");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = HooksConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = HooksConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = HooksConfig::load_or_default(Some(&dir.path().join("missing.toml")));
        assert_eq!(config, HooksConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hooks.toml");
        std::fs::write(&path, "[extraction]\nmin_text_len = 40\n").unwrap();

        let config = HooksConfig::load_or_default(Some(&path));
        assert_eq!(config.extraction.min_text_len, 40);
        assert_eq!(config.extraction.detailed_text_len, 500);
    }
}
