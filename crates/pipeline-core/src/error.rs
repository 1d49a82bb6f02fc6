//! Error types for pipeline-core

use std::path::PathBuf;

/// Result type for pipeline-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pipeline-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A required configuration key is absent or empty
    #[error("'{key}' not set in {path}")]
    MissingConfigKey { key: String, path: PathBuf },

    /// A path still carries the template placeholder
    #[error("Please edit {path} and replace REPLACE_ME in '{key}' with an actual path")]
    PlaceholderPath { key: String, path: PathBuf },

    /// A routing pattern failed to compile
    #[error("Invalid routing pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Project name is not a single path component
    #[error("Invalid project name: '{name}'")]
    InvalidProjectName { name: String },

    /// Target project directory already exists
    #[error("Project '{name}' already exists at {path}")]
    ProjectExists { name: String, path: PathBuf },

    /// File to ingest does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path to ingest is not a regular file
    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// File lives inside the tool's own installation directory
    #[error("Cannot ingest files from within the tool installation at {install_dir}: {path}")]
    InsideInstallDir { path: PathBuf, install_dir: PathBuf },

    /// Manifest could not be read or written
    #[error("Manifest error at {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Manifest is readable but lacks a required column
    #[error("Manifest at {path} has no '{column}' column")]
    ManifestColumn { path: PathBuf, column: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from pipeline-fs
    #[error(transparent)]
    Fs(#[from] pipeline_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn manifest(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Manifest {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts a whole run rather than a single file.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::MissingConfigKey { .. }
                | Self::PlaceholderPath { .. }
                | Self::InvalidPattern { .. }
        )
    }
}
