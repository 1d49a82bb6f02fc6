//! Atomic writes and file relocation

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive()
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;

    temp_file.write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock()
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;

    fs::rename(&temp_path, path)
        .map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Move a file, removing it from its original location.
///
/// Tries a plain rename first. When that fails (typically because source and
/// destination live on different filesystems) the file is copied and the
/// source removed. Parent directories of `dest` must already exist.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !src.exists() {
                return Err(Error::io(src, rename_err));
            }
            tracing::debug!(
                src = %src.display(),
                dest = %dest.display(),
                error = %rename_err,
                "rename failed, falling back to copy"
            );
            fs::copy(src, dest).map_err(|e| Error::io(dest, e))?;
            fs::remove_file(src).map_err(|e| Error::io(src, e))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn move_file_relocates_content() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        fs::write(&src, "payload").unwrap();

        move_file(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
    }

    #[test]
    fn move_file_missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = move_file(&dir.path().join("gone"), &dir.path().join("dest"));
        assert!(result.unwrap_err().is_not_found());
    }
}
