//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "konform.toml";

const DEFAULT_CONFIG: &str = r#"# konform configuration
# Looked up in the linted root, then in ~/.konform/config.toml

[walker]
# Directory globs, relative to the linted root, that are not walked
exclude = [
    "**/.git",
    # "vendor",
]

# Descend into symlinked directories
follow_links = false
"#;

/// Writes a default `konform.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to exclude directories");
    println!("  2. Run: konform check");

    Ok(())
}
