//! Single-file ingestion: stabilize, hash, deduplicate, move, record
//!
//! The move and the manifest append are not transactional. If the move
//! succeeds and the append fails, the file sits in the project without a
//! manifest row; nothing reconciles that state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use pipeline_fs::{
    StabilizeOutcome, absolute_path, compute_sha256, generate_timestamped_filename,
    handle_collision, io, stabilize_file, validate_path_identifier,
};

use crate::config::PipelineConfig;
use crate::manifest::{Action, CsvManifest, ManifestLog, ManifestRow};
use crate::{Error, Result};

/// Stage recorded for files entering a project.
pub const RAW_STAGE: &str = "raw";

/// Default subdirectory for ingested files.
pub const DEFAULT_SUBDIR: &str = "data/raw";

/// Default provenance label.
pub const DEFAULT_SOURCE: &str = "manual";

/// Per-run ingestion settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Provenance label written to the manifest
    pub source: String,
    /// Free-text notes written to the manifest
    pub notes: String,
    /// Files under this directory are refused
    pub install_dir: Option<PathBuf>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            notes: String::new(),
            install_dir: None,
        }
    }
}

impl IngestOptions {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }
}

/// Result of ingesting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// File was moved into the project
    Ingested {
        destination: PathBuf,
        sha256: String,
        size_bytes: u64,
        stabilized: StabilizeOutcome,
    },
    /// Identical content was already recorded; the file was not moved
    DuplicateSkipped {
        existing: String,
        sha256: String,
        size_bytes: u64,
        stabilized: StabilizeOutcome,
    },
}

impl IngestOutcome {
    pub fn is_ingested(&self) -> bool {
        matches!(self, Self::Ingested { .. })
    }

    pub fn sha256(&self) -> &str {
        match self {
            Self::Ingested { sha256, .. } | Self::DuplicateSkipped { sha256, .. } => sha256,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Self::Ingested { .. } => Action::Ingested,
            Self::DuplicateSkipped { .. } => Action::DuplicateSkipped,
        }
    }
}

/// Ingest one file into `project`/`subdir`, recording it in the project's
/// CSV manifest.
pub fn ingest_file(
    path: &Path,
    project: &str,
    subdir: &str,
    config: &PipelineConfig,
    options: &IngestOptions,
) -> Result<IngestOutcome> {
    let manifest = CsvManifest::new(config.manifest_path(project));
    ingest_file_with(path, project, subdir, config, options, &manifest)
}

/// Ingest one file, recording it in the given manifest log.
///
/// # Errors
///
/// - [`Error::FileNotFound`] / [`Error::NotAFile`] for unusable sources
/// - [`Error::InsideInstallDir`] if the file belongs to the tool itself
/// - [`Error::InvalidProjectName`] if `project` is not a plain name
/// - I/O and manifest errors while hashing, moving or recording
pub fn ingest_file_with<M: ManifestLog>(
    path: &Path,
    project: &str,
    subdir: &str,
    config: &PipelineConfig,
    options: &IngestOptions,
    manifest: &M,
) -> Result<IngestOutcome> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if !validate_path_identifier(project) {
        return Err(Error::InvalidProjectName {
            name: project.to_string(),
        });
    }

    // Not canonicalized: a symlink is recorded and guarded where it lives
    let source_path = absolute_path(path)?;
    if let Some(install_dir) = &options.install_dir {
        let install_dir = absolute_path(install_dir)?;
        if source_path.starts_with(&install_dir) {
            return Err(Error::InsideInstallDir {
                path: path.to_path_buf(),
                install_dir,
            });
        }
    }

    let stabilized = stabilize_file(path, &config.stabilize.options())?;
    if stabilized == StabilizeOutcome::TimedOut {
        tracing::warn!(path = %path.display(), "file may still be downloading, proceeding anyway");
    }

    let sha256 = compute_sha256(path)?;
    let size_bytes = fs::metadata(path)?.len();
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let record = |path: &Path, notes: String, action: Action| ManifestRow {
        project: project.to_string(),
        stage: RAW_STAGE.to_string(),
        path: path.to_string_lossy().into_owned(),
        ts: iso_timestamp(Local::now().naive_local()),
        original_name: original_name.clone(),
        size_bytes,
        sha256: sha256.clone(),
        source: options.source.clone(),
        notes,
        action,
        derived_from: String::new(),
        code_commit: String::new(),
    };

    if let Some(existing) = manifest.find_duplicate(&sha256) {
        tracing::info!(
            path = %path.display(),
            existing = %existing,
            "duplicate detected, recording alias"
        );
        let notes = format!("Duplicate of {}. {}", existing, options.notes)
            .trim()
            .to_string();
        manifest.append(&record(&source_path, notes, Action::DuplicateSkipped))?;

        return Ok(IngestOutcome::DuplicateSkipped {
            existing,
            sha256,
            size_bytes,
            stabilized,
        });
    }

    let new_name =
        generate_timestamped_filename(&original_name, &config.naming, Local::now().naive_local())?;

    let dest_dir = config.project_dir(project).join(subdir);
    fs::create_dir_all(&dest_dir)?;
    let dest_dir = dunce::canonicalize(&dest_dir)?;
    let destination = handle_collision(&dest_dir.join(new_name));

    tracing::debug!(
        from = %source_path.display(),
        to = %destination.display(),
        "moving file"
    );
    io::move_file(path, &destination)?;

    manifest.append(&record(&destination, options.notes.clone(), Action::Ingested))?;

    Ok(IngestOutcome::Ingested {
        destination,
        sha256,
        size_bytes,
        stabilized,
    })
}

/// Local timestamp with microseconds, e.g. `2024-03-09T12:30:05.123456`.
pub fn iso_timestamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
