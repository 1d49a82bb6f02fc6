//! Shell-style expansion of path arguments

use std::path::{Path, PathBuf};

use pipeline_fs::expand_home_str;

/// Expand `~` and glob wildcards in one argument.
///
/// Matches come back in glob order. An argument that names an existing
/// path literally is used as is even if it contains glob metacharacters
/// (`report [draft].pdf`). Returns an empty list when nothing matches.
pub fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let expanded = expand_home_str(pattern);

    let matches: Vec<PathBuf> = match glob::glob(&expanded) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable glob match");
                    None
                }
            })
            .collect(),
        Err(e) => {
            tracing::debug!(pattern = %expanded, error = %e, "not a valid glob pattern");
            Vec::new()
        }
    };

    if matches.is_empty() && Path::new(&expanded).exists() {
        return vec![PathBuf::from(expanded)];
    }
    matches
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
