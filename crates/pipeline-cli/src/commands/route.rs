//! Route command implementation
//!
//! Classifies files by name using the configured routing rules and
//! ingests each match into the selected project.

use std::path::PathBuf;

use colored::Colorize;
use pipeline_core::{IngestOptions, PipelineConfig, ingest_file, route_file};

use super::files::{expand_pattern, list_files};
use super::{print_banner, print_summary, report_failure, report_outcome};
use crate::error::{CliError, Result};

/// Where the files to route come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSource {
    /// Every regular file directly inside `downloads_dir`
    Downloads,
    /// Glob-expanded command-line arguments
    Paths(Vec<String>),
}

impl RouteSource {
    /// Provenance label recorded for routed files.
    fn label(&self) -> &'static str {
        match self {
            RouteSource::Downloads => "Downloads",
            RouteSource::Paths(_) => "routed",
        }
    }
}

/// Counts reported by `route`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub ingested: usize,
    pub duplicates: usize,
    pub unrouted: usize,
    pub failed: usize,
}

/// Run the route command
pub fn run_route(
    config: &PipelineConfig,
    source: &RouteSource,
    base_options: &IngestOptions,
) -> Result<RouteSummary> {
    let files = collect_files(config, source)?;
    let mut summary = RouteSummary::default();

    if files.is_empty() {
        match source {
            RouteSource::Downloads => println!("No files found in Downloads directory"),
            RouteSource::Paths(_) => println!("No files matched the specified patterns"),
        }
        return Ok(summary);
    }

    if let (RouteSource::Downloads, Some(dir)) = (source, &config.downloads_dir) {
        println!("Found {} file(s) in {}", files.len(), dir.display());
    }

    let options = base_options.clone().with_source(source.label());

    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        print_banner(&format!("File: {}", name));

        let Some(route) = route_file(&file, &config.routing) else {
            println!("{} No routing rule matched, skipping", "!!".yellow().bold());
            summary.unrouted += 1;
            continue;
        };
        println!("Routed to: {}/{}", route.project.cyan(), route.subdir.cyan());

        match ingest_file(&file, route.project, route.subdir, config, &options) {
            Ok(outcome) => {
                report_outcome(&outcome, &config.projects_base);
                if outcome.is_ingested() {
                    summary.ingested += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Err(e) if e.is_config_error() => return Err(e.into()),
            Err(e) => {
                report_failure(&e);
                summary.failed += 1;
            }
        }
    }

    let mut line = format!(
        "{} ingested, {} duplicates, {} not routed",
        summary.ingested, summary.duplicates, summary.unrouted
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    print_summary(&line);

    Ok(summary)
}

fn collect_files(config: &PipelineConfig, source: &RouteSource) -> Result<Vec<PathBuf>> {
    match source {
        RouteSource::Downloads => {
            let dir = config
                .downloads_dir
                .as_ref()
                .ok_or_else(|| CliError::user("downloads_dir not set in config"))?;
            if !dir.exists() {
                return Err(CliError::user(format!(
                    "Downloads directory not found: {}",
                    dir.display()
                )));
            }
            Ok(list_files(dir)?)
        }
        RouteSource::Paths(patterns) => {
            if patterns.is_empty() {
                return Err(CliError::user(
                    "No files specified. Use --from-downloads or provide file paths",
                ));
            }
            Ok(patterns
                .iter()
                .flat_map(|p| expand_pattern(p))
                .filter(|p| p.is_file())
                .collect())
        }
    }
}
