//! [`TestWorkspace`] builder for pipeline test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory laid out like a real pipeline installation:
///
/// ```text
/// <root>/
///   projects/       projects_base
///   downloads/      downloads_dir
///   incoming/       scratch area for files to ingest
///   config.yaml     written by `write_config`
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use pipeline_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_config(&[("^invoice", "acct", "data/raw")]);
/// let file = ws.incoming_file("Invoice_2024.pdf", b"pdf bytes");
/// assert!(file.exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create the directory skeleton.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        for dir in ["projects", "downloads", "incoming"] {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        Self { temp_dir }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn projects_base(&self) -> PathBuf {
        self.root().join("projects")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root().join("downloads")
    }

    pub fn incoming_dir(&self) -> PathBuf {
        self.root().join("incoming")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.yaml")
    }

    /// Manifest path of a project under the projects base.
    pub fn manifest_path(&self, project: &str) -> PathBuf {
        self.projects_base()
            .join(project)
            .join("catalog")
            .join("manifest.csv")
    }

    /// Write `config.yaml` with the given routing rules and fast
    /// stabilization polling. Returns the config path.
    pub fn write_config(&self, rules: &[(&str, &str, &str)]) -> PathBuf {
        let mut yaml = format!(
            "projects_base: \"{}\"\n\
downloads_dir: \"{}\"\n\
naming:\n  timestamp_format: \"%Y-%m-%dT%H%M%S\"\n  slug_maxlen: 60\n  lower_ext: true\n\
stabilize:\n  poll_interval_ms: 1\n  stable_polls: 2\n  timeout_secs: 5\n",
            yaml_path(&self.projects_base()),
            yaml_path(&self.downloads_dir()),
        );

        if !rules.is_empty() {
            yaml.push_str("routing:\n");
            for (pattern, project, subdir) in rules {
                yaml.push_str(&format!(
                    "  - pattern: '{pattern}'\n    project: {project}\n    subdir: {subdir}\n"
                ));
            }
        }

        self.write_raw_config(&yaml)
    }

    /// Write arbitrary config text. Returns the config path.
    pub fn write_raw_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a file in `incoming/`.
    pub fn incoming_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.incoming_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a file in `downloads/`.
    pub fn download(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.downloads_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Files directly inside a project subdirectory, sorted by name.
    pub fn files_in(&self, project: &str, subdir: &str) -> Vec<PathBuf> {
        let dir = self.projects_base().join(project).join(subdir);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }

    /// Raw manifest text of a project.
    pub fn manifest_text(&self, project: &str) -> String {
        fs::read_to_string(self.manifest_path(project)).unwrap()
    }
}

/// Escape a path for a double-quoted YAML scalar.
fn yaml_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\").replace('"', "\\\"")
}
