//! Add command implementation
//!
//! Ingests explicitly named files into one project, bypassing routing.

use colored::Colorize;
use pipeline_core::{IngestOptions, PipelineConfig, ingest_file};

use super::files::expand_pattern;
use super::{print_banner, print_summary, report_failure, report_outcome};
use crate::error::{CliError, Result};

/// Counts reported by `add`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
    pub ingested: usize,
    /// Duplicates and per-file failures
    pub skipped: usize,
}

/// Run the add command
///
/// Each argument is glob-expanded; directories are skipped. A file that
/// cannot be ingested is reported and counted as skipped, and the
/// remaining files are still processed.
pub fn run_add(
    config: &PipelineConfig,
    paths: &[String],
    project: &str,
    subdir: &str,
    options: &IngestOptions,
) -> Result<AddSummary> {
    if paths.is_empty() {
        return Err(CliError::user("No files specified"));
    }

    let mut summary = AddSummary::default();

    for pattern in paths {
        let files = expand_pattern(pattern);
        if files.is_empty() {
            eprintln!("{}: No files match pattern: {}", "warning".yellow().bold(), pattern);
            continue;
        }

        for file in files {
            if file.is_dir() {
                eprintln!("Skipping directory: {}", file.display());
                continue;
            }

            print_banner(&format!("File: {}", file.display()));

            match ingest_file(&file, project, subdir, config, options) {
                Ok(outcome) => {
                    report_outcome(&outcome, &config.projects_base);
                    if outcome.is_ingested() {
                        summary.ingested += 1;
                    } else {
                        summary.skipped += 1;
                    }
                }
                Err(e) if e.is_config_error() => return Err(e.into()),
                Err(e) => {
                    report_failure(&e);
                    summary.skipped += 1;
                }
            }
        }
    }

    print_summary(&format!(
        "{} ingested, {} skipped",
        summary.ingested, summary.skipped
    ));

    Ok(summary)
}
