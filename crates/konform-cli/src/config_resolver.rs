//! Configuration lookup for a lint run.
//!
//! The first existing candidate wins:
//!
//! 1. `--config <file>`
//! 2. `<root>/konform.toml`, then `<root>/.konform.toml`
//! 3. `$KONFORM_CONFIG_DIR/config.toml`, else `~/.konform/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result};
use konform_core::Config;
use std::path::{Path, PathBuf};

/// Config file names looked up in the linted root, in order.
const ROOT_CONFIG_NAMES: &[&str] = &["konform.toml", ".konform.toml"];

/// Config file name inside the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "KONFORM_CONFIG_DIR";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the linted root directory.
    Root(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Root(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// An explicit path that does not exist is an error; the other sources
    /// were found on disk.
    pub fn load(&self) -> Result<Config> {
        match self.path() {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display())),
            None => Ok(Config::default()),
        }
    }
}

/// Resolves the configuration source for a run over `root`.
#[must_use]
pub fn resolve(root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global_dir(root, explicit, global_config_dir())
}

fn resolve_with_global_dir(
    root: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = ROOT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found root config: {}", path.display());
        return ConfigSource::Root(path);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(path) if path.is_file() => {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

/// Global config directory: `$KONFORM_CONFIG_DIR`, else `~/.konform`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".konform")),
    }
}
