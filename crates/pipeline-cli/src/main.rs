//! Research Data Pipeline CLI
//!
//! Ingests files into per-project data directories with deduplication,
//! timestamped renaming and a CSV provenance manifest.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use pipeline_core::{DEFAULT_SOURCE, IngestOptions, PipelineConfig, load_config};

use cli::{Cli, Commands};
use commands::RouteSource;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(config = %cli.config.display(), "starting");

    let Some(command) = cli.command else {
        println!("{} Research Data Pipeline", "ingest".green().bold());
        println!();
        println!("Run {} for available commands.", "ingest --help".cyan());
        return Err(CliError::user("no command given"));
    };

    let config = load_config(&cli.config)?;
    execute_command(command, &config)
}

fn execute_command(cmd: Commands, config: &PipelineConfig) -> Result<()> {
    let options = base_ingest_options();

    match cmd {
        Commands::InitProject { name } => {
            commands::run_init_project(config, &name)?;
        }
        Commands::Add {
            paths,
            project,
            subdir,
            source,
            notes,
        } => {
            let options = options
                .with_source(source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()))
                .with_notes(notes.unwrap_or_default());
            commands::run_add(config, &paths, &project, &subdir, &options)?;
        }
        Commands::Route {
            paths,
            from_downloads,
        } => {
            let source = if from_downloads {
                RouteSource::Downloads
            } else {
                RouteSource::Paths(paths)
            };
            commands::run_route(config, &source, &options)?;
        }
        Commands::Status {
            project,
            limit,
            json,
        } => commands::run_status(config, &project, limit, json)?,
    }
    Ok(())
}

/// Ingest options shared by all commands: refuse files that belong to
/// the tool's own installation.
fn base_ingest_options() -> IngestOptions {
    match install_dir() {
        Some(dir) => IngestOptions::default().with_install_dir(dir),
        None => IngestOptions::default(),
    }
}

/// Directory containing the running executable.
fn install_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(PathBuf::from)
}
