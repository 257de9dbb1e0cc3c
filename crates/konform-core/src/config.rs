//! Configuration types for konform.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for konform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tree walk configuration.
    #[serde(default)]
    pub walker: WalkerConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Tree walk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkerConfig {
    /// Glob patterns, matched against directory paths relative to the root,
    /// whose subtrees are not visited.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to descend into symlinked directories.
    #[serde(default)]
    pub follow_links: bool,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.walker.exclude.is_empty());
        assert!(!config.walker.follow_links);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[walker]
exclude = ["**/.git", "vendor/**"]
follow_links = true
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.walker.exclude, vec!["**/.git", "vendor/**"]);
        assert!(config.walker.follow_links);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = Config::parse("[walker]\nexclud = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/konform.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
