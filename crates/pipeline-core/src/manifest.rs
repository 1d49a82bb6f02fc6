//! Append-only CSV manifest of ingestion events
//!
//! Every ingested or duplicate-detected file produces one row. Rows are
//! never rewritten or removed. Duplicate detection is a linear scan of the
//! `sha256` column.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fixed manifest columns, in file order.
pub const MANIFEST_HEADER: [&str; 12] = [
    "project",
    "stage",
    "path",
    "ts",
    "original_name",
    "size_bytes",
    "sha256",
    "source",
    "notes",
    "action",
    "derived_from",
    "code_commit",
];

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// File was moved into the project
    Ingested,
    /// Content already present; file left in place
    DuplicateSkipped,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ingested => write!(f, "ingested"),
            Action::DuplicateSkipped => write!(f, "duplicate_skipped"),
        }
    }
}

/// One manifest record. Field order matches [`MANIFEST_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub project: String,
    pub stage: String,
    pub path: String,
    pub ts: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub source: String,
    pub notes: String,
    pub action: Action,
    #[serde(default)]
    pub derived_from: String,
    #[serde(default)]
    pub code_commit: String,
}

/// Append-only event log with a duplicate-by-hash query.
///
/// The ingestion engine only depends on this trait, so the CSV file can be
/// replaced by another store.
pub trait ManifestLog {
    /// Path recorded for the first row carrying `sha256`, if any.
    ///
    /// Implementations fail open: an unreadable log reports no duplicate.
    fn find_duplicate(&self, sha256: &str) -> Option<String>;

    /// Append one row.
    fn append(&self, row: &ManifestRow) -> Result<()>;
}

/// CSV file implementation of [`ManifestLog`]
#[derive(Debug, Clone)]
pub struct CsvManifest {
    path: PathBuf,
}

impl CsvManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with its header if it does not exist yet.
    ///
    /// Parent directories are created as needed. Calling this on an existing
    /// manifest is a no-op.
    pub fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_path(&self.path)
            .map_err(|e| Error::manifest(&self.path, e))?;
        writer
            .write_record(MANIFEST_HEADER)
            .map_err(|e| Error::manifest(&self.path, e))?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), "created manifest");
        Ok(())
    }

    /// Look up a hash, surfacing read errors.
    ///
    /// A missing file or a manifest without a `sha256` column has no
    /// duplicates.
    pub fn lookup(&self, sha256: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| Error::manifest(&self.path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::manifest(&self.path, e))?
            .clone();
        let Some(sha_idx) = headers.iter().position(|h| h == "sha256") else {
            return Ok(None);
        };
        let path_idx = headers.iter().position(|h| h == "path").ok_or_else(|| {
            Error::ManifestColumn {
                path: self.path.clone(),
                column: "path".into(),
            }
        })?;

        for record in reader.records() {
            let record = record.map_err(|e| Error::manifest(&self.path, e))?;
            if record.get(sha_idx) == Some(sha256) {
                return Ok(Some(record.get(path_idx).unwrap_or_default().to_string()));
            }
        }

        Ok(None)
    }

    /// Load every row in file order.
    pub fn read_rows(&self) -> Result<Vec<ManifestRow>> {
        let mut reader = ReaderBuilder::new()
            .from_path(&self.path)
            .map_err(|e| Error::manifest(&self.path, e))?;

        reader
            .deserialize::<ManifestRow>()
            .map(|row| row.map_err(|e| Error::manifest(&self.path, e)))
            .collect()
    }
}

impl ManifestLog for CsvManifest {
    fn find_duplicate(&self, sha256: &str) -> Option<String> {
        match self.lookup(sha256) {
            Ok(found) => found,
            Err(e) => {
                // Re-ingesting is preferred over silently dropping a file
                tracing::warn!(error = %e, "error reading manifest, assuming no duplicate");
                None
            }
        }
    }

    fn append(&self, row: &ManifestRow) -> Result<()> {
        self.ensure()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        writer
            .serialize(row)
            .map_err(|e| Error::manifest(&self.path, e))?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn row(sha256: &str, path: &str, action: Action) -> ManifestRow {
        ManifestRow {
            project: "acct".into(),
            stage: "raw".into(),
            path: path.into(),
            ts: "2024-03-09T12:30:05.000000".into(),
            original_name: "Invoice.pdf".into(),
            size_bytes: 42,
            sha256: sha256.into(),
            source: "manual".into(),
            notes: String::new(),
            action,
            derived_from: String::new(),
            code_commit: String::new(),
        }
    }

    #[test]
    fn ensure_writes_header_once() {
        let dir = tempdir().unwrap();
        let manifest = CsvManifest::new(dir.path().join("catalog").join("manifest.csv"));

        manifest.ensure().unwrap();
        manifest.ensure().unwrap();
        manifest.append(&row("abc", "/p/a.pdf", Action::Ingested)).unwrap();
        manifest.append(&row("def", "/p/b.pdf", Action::Ingested)).unwrap();

        let content = fs::read_to_string(manifest.path()).unwrap();
        let header = MANIFEST_HEADER.join(",");
        assert_eq!(content.matches(&header).count(), 1);
        assert!(content.starts_with(&header));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn append_creates_missing_manifest() {
        let dir = tempdir().unwrap();
        let manifest = CsvManifest::new(dir.path().join("deep/catalog/manifest.csv"));

        manifest.append(&row("abc", "/p/a.pdf", Action::Ingested)).unwrap();

        let rows = manifest.read_rows().unwrap();
        assert_eq!(rows, vec![row("abc", "/p/a.pdf", Action::Ingested)]);
    }

    #[test]
    fn lookup_returns_first_match() {
        let dir = tempdir().unwrap();
        let manifest = CsvManifest::new(dir.path().join("manifest.csv"));
        manifest.append(&row("abc", "/p/first.pdf", Action::Ingested)).unwrap();
        manifest.append(&row("abc", "/dl/again.pdf", Action::DuplicateSkipped)).unwrap();

        assert_eq!(manifest.find_duplicate("abc").as_deref(), Some("/p/first.pdf"));
        assert_eq!(manifest.find_duplicate("zzz"), None);
    }

    #[test]
    fn missing_manifest_has_no_duplicates() {
        let dir = tempdir().unwrap();
        let manifest = CsvManifest::new(dir.path().join("manifest.csv"));
        assert_eq!(manifest.lookup("abc").unwrap(), None);
    }

    #[test]
    fn manifest_without_sha_column_has_no_duplicates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.csv");
        fs::write(&path, "project,path\nacct,/p/a.pdf\n").unwrap();

        assert_eq!(CsvManifest::new(path).lookup("abc").unwrap(), None);
    }

    #[test]
    fn unreadable_manifest_fails_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.csv");
        // Invalid UTF-8 makes the CSV reader fail on the header row
        fs::write(&path, [0xff, 0xfe, b',', 0xfd, b'\n']).unwrap();

        let manifest = CsvManifest::new(path);
        assert!(manifest.lookup("abc").is_err());
        assert_eq!(manifest.find_duplicate("abc"), None);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let dir = tempdir().unwrap();
        let manifest = CsvManifest::new(dir.path().join("manifest.csv"));
        let mut noted = row("abc", "/p/a,b.pdf", Action::DuplicateSkipped);
        noted.notes = "Duplicate of /p/x.pdf. from \"vendor\", batch 2".into();

        manifest.append(&noted).unwrap();

        assert_eq!(manifest.read_rows().unwrap(), vec![noted]);
        assert_eq!(manifest.lookup("abc").unwrap().as_deref(), Some("/p/a,b.pdf"));
    }
}
