//! konform CLI tool.
//!
//! Usage:
//! ```bash
//! konform check [OPTIONS] [PATH]
//! konform init
//! ```
//!
//! Exit codes: `0` clean, `1` problems found, `2` only warnings found,
//! `3` the run could not start.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Exit code for failures before or outside the lint itself.
const EXIT_STARTUP_FAILURE: i32 = 3;

/// Linter for kustomize overlay trees
#[derive(Parser)]
#[command(name = "konform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "KONFORM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint every kustomize directory under PATH
    Check {
        /// Root directory to walk (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Directory glob patterns to skip (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Streamed human-readable report.
    #[default]
    Text,
    /// Single JSON document printed at the end of the run.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_STARTUP_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, exclude, &source)
        }
        Commands::Init { force } => {
            commands::init::run(Path::new("."), force)?;
            Ok(0)
        }
    }
}

/// Logs go to stderr so the report on stdout stays line-exact.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_defaults_to_current_directory_and_text() {
        let cli = Cli::try_parse_from(["konform", "check"]).unwrap();
        match cli.command {
            Commands::Check {
                path,
                format,
                exclude,
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(format, OutputFormat::Text);
                assert!(exclude.is_empty());
            }
            Commands::Init { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn check_accepts_repeated_excludes() {
        let cli = Cli::try_parse_from([
            "konform", "check", "deploy", "-e", "vendor", "--exclude", "**/.git", "-f", "json",
        ])
        .unwrap();
        let Commands::Check {
            path,
            format,
            exclude,
        } = cli.command
        else {
            panic!("expected check");
        };
        assert_eq!(path, PathBuf::from("deploy"));
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(exclude, vec!["vendor", "**/.git"]);
    }

    #[test]
    fn missing_root_is_a_startup_failure() {
        let cli = Cli::try_parse_from(["konform", "check", "/nonexistent/konform/root"]).unwrap();
        assert!(run(cli).is_err());
    }
}
