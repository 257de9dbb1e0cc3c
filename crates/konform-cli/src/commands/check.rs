//! Check command implementation.

use anyhow::{Context, Result};
use konform_core::{Linter, Reporter, Summary};
use std::io::Write;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command, returning the process exit code.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<i32> {
    if let ConfigSource::Global(p) = source {
        tracing::info!("Using global config: {}", p.display());
    }
    let config = source.load()?;

    let linter = Linter::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .build()
        .with_context(|| format!("Cannot lint {}", path.display()))?;

    let summary = match format {
        OutputFormat::Text => lint_text(&linter, &mut std::io::stdout().lock())?,
        OutputFormat::Json => {
            let mut sink = std::io::sink();
            let mut reporter = Reporter::new(&mut sink);
            linter.run(&mut reporter).context("Lint run failed")?;
            let (summary, findings) = reporter.finish();
            super::output::print_json(linter.root(), &summary, &findings)?;
            summary
        }
    };

    Ok(summary.exit_code())
}

/// Streams the text report to `out`.
fn lint_text(linter: &Linter, out: &mut dyn Write) -> Result<Summary> {
    let summary = {
        let mut reporter = Reporter::new(out);
        linter.run(&mut reporter).context("Lint run failed")?
    };
    out.flush().context("Failed to flush report")?;
    Ok(summary)
}
