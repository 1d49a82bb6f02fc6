//! Core orchestration layer for the research data pipeline
//!
//! This crate coordinates the filesystem primitives from `pipeline-fs`
//! into the pipeline's operations:
//!
//! - **Configuration**: loading, validation and path expansion
//! - **Manifest**: append-only CSV provenance log with hash lookup
//! - **Routing**: ordered, case-insensitive filename rules
//! - **Ingestion**: stabilize, hash, deduplicate, move, record
//! - **Projects**: standard directory scaffolding
//!
//! # Architecture
//!
//! ```text
//!          pipeline-cli
//!               |
//!         pipeline-core
//!               |
//!          pipeline-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pipeline_core::{IngestOptions, ingest_file, load_config};
//!
//! fn example() -> pipeline_core::Result<()> {
//!     let config = load_config(Path::new("tooling/config.yaml"))?;
//!     let outcome = ingest_file(
//!         Path::new("/tmp/Invoice_2024.pdf"),
//!         "acct",
//!         "data/raw",
//!         &config,
//!         &IngestOptions::default(),
//!     )?;
//!     println!("{:?}", outcome.action());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod manifest;
pub mod project;
pub mod router;

pub use config::{MANIFEST_RELATIVE_PATH, PipelineConfig, StabilizeConfig, load_config};
pub use error::{Error, Result};
pub use ingest::{
    DEFAULT_SOURCE, DEFAULT_SUBDIR, IngestOptions, IngestOutcome, RAW_STAGE, ingest_file,
    ingest_file_with,
};
pub use manifest::{Action, CsvManifest, MANIFEST_HEADER, ManifestLog, ManifestRow};
pub use project::{ProjectScaffold, init_project};
pub use router::{Route, RoutingRule, route_file};
