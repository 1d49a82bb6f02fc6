//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "tooling/config.yaml";

/// Research Data Pipeline - privacy-first data ingestion
///
/// File contents are never read except to compute checksums.
#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "For more info, see README.md")]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true, env = "INGEST_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new research project from template
    InitProject {
        /// Project name
        #[arg(long)]
        name: String,
    },

    /// Add specific files to a project (bypass routing)
    ///
    /// Examples:
    ///   ingest add ~/Downloads/survey.csv --project field
    ///   ingest add 'exports/*.xlsx' --project acct --subdir data/raw/exports
    Add {
        /// File paths or glob patterns
        #[arg(required = true)]
        paths: Vec<String>,

        /// Target project name
        #[arg(long)]
        project: String,

        /// Subdirectory within project
        #[arg(long, default_value = "data/raw")]
        subdir: String,

        /// Source label for manifest (default: manual)
        #[arg(long)]
        source: Option<String>,

        /// Notes to record in manifest
        #[arg(long)]
        notes: Option<String>,
    },

    /// Route files automatically based on config patterns
    Route {
        /// File paths or glob patterns (optional)
        paths: Vec<String>,

        /// Route all files from downloads_dir in config
        #[arg(long)]
        from_downloads: bool,
    },

    /// Show recent manifest entries for a project
    Status {
        /// Project name
        #[arg(long)]
        project: String,

        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
