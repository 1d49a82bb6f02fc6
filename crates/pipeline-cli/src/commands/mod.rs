//! Command implementations for pipeline-cli

pub mod add;
pub mod files;
pub mod init;
pub mod route;
pub mod status;

pub use add::{AddSummary, run_add};
pub use init::run_init_project;
pub use route::{RouteSource, RouteSummary, run_route};
pub use status::run_status;

use colored::Colorize;
use pipeline_core::IngestOutcome;

const RULE_WIDTH: usize = 60;

/// Print a `====` framed heading line.
pub(crate) fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

/// Print a closing `====` framed summary line.
pub(crate) fn print_summary(summary: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{}", rule);
    println!("{} {}", "Summary:".bold(), summary);
    println!("{}", rule);
}

/// Describe a single ingestion result on stdout.
pub(crate) fn report_outcome(outcome: &IngestOutcome, projects_base: &std::path::Path) {
    let short_hash = &outcome.sha256()[..16.min(outcome.sha256().len())];
    match outcome {
        IngestOutcome::Ingested {
            destination,
            stabilized,
            ..
        } => {
            if !stabilized.is_stable() {
                println!("{} file may still be downloading", "TIMEOUT".yellow().bold());
            }
            println!("SHA256: {}...", short_hash.dimmed());
            let shown = destination.strip_prefix(projects_base).unwrap_or(destination);
            println!("Moved to: {}", shown.display().to_string().cyan());
            println!("{} Ingested successfully", "OK".green().bold());
        }
        IngestOutcome::DuplicateSkipped {
            existing,
            stabilized,
            ..
        } => {
            if !stabilized.is_stable() {
                println!("{} file may still be downloading", "TIMEOUT".yellow().bold());
            }
            println!("SHA256: {}...", short_hash.dimmed());
            println!("{} Duplicate detected (SHA256 match)", "!!".yellow().bold());
            println!("   Existing: {}", existing);
            println!("   Skipping ingest, recording alias in manifest");
        }
    }
}

/// Print a per-file failure to stderr.
pub(crate) fn report_failure(error: &pipeline_core::Error) {
    eprintln!("{}: {}", "error".red().bold(), error);
}
