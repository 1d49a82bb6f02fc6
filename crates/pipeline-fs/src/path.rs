//! Path helpers

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user`
/// forms and paths without a tilde are returned unchanged. If the home
/// directory cannot be determined the path is returned unchanged.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    let rest = if s == "~" {
        ""
    } else if let Some(rest) = s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\")) {
        rest
    } else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Expand a leading `~` in a string pattern, keeping it a string.
///
/// Used for glob patterns, which must stay textual until matched.
pub fn expand_home_str(pattern: &str) -> String {
    if pattern == "~" || pattern.starts_with("~/") || pattern.starts_with("~\\") {
        expand_home(pattern).to_string_lossy().into_owned()
    } else {
        pattern.to_string()
    }
}

/// Make a path absolute against the current directory and fold `.`/`..`
/// lexically.
///
/// Symlinks are not resolved, so the result names the file the way the
/// caller did.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Check that a name is usable as a single path component.
///
/// Rejects empty names, `.`/`..`, and anything containing a path separator
/// or NUL, so joining the name onto a base directory cannot escape it.
pub fn validate_path_identifier(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_home("/data/raw"), PathBuf::from("/data/raw"));
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/Downloads"), home.join("Downloads"));
    }

    #[test]
    fn path_identifiers() {
        assert!(validate_path_identifier("acct"));
        assert!(validate_path_identifier("survey-2024_v2"));
        assert!(!validate_path_identifier(""));
        assert!(!validate_path_identifier(".."));
        assert!(!validate_path_identifier("a/b"));
        assert!(!validate_path_identifier("a\\b"));
    }

    #[test]
    fn absolute_path_folds_dot_components() {
        let base = std::env::temp_dir();
        let dotted = base.join("tool").join("..").join(".").join("data.csv");
        let resolved = absolute_path(&dotted).unwrap();
        assert_eq!(resolved, absolute_path(&base.join("data.csv")).unwrap());
        assert!(resolved.is_absolute());
    }

    #[test]
    fn absolute_path_keeps_relative_names_under_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            absolute_path(Path::new("incoming/a.csv")).unwrap(),
            cwd.join("incoming/a.csv")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_does_not_follow_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.csv");
        let link = dir.path().join("link.csv");
        std::fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(absolute_path(&link).unwrap().ends_with("link.csv"));
    }

    #[test]
    fn glob_patterns_keep_wildcards() {
        let expanded = expand_home_str("~/Downloads/*.csv");
        assert!(expanded.ends_with("*.csv"));
        assert_eq!(expand_home_str("data/*.pdf"), "data/*.pdf");
    }
}
