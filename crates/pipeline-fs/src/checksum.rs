//! SHA-256 checksum utilities
//!
//! Checksums are lowercase hex digests with no prefix, which is the form
//! stored in the manifest's `sha256` column and compared for deduplication.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Read buffer size used when hashing files.
const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed in 8 KiB chunks so arbitrarily large inputs are
/// hashed in constant memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute_content_checksum(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    #[test]
    fn content_checksum_is_bare_hex() {
        let checksum = compute_content_checksum("hello world");
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn different_content_different_checksum() {
        let a = compute_content_checksum("aaa");
        let b = compute_content_checksum("bbb");
        assert_ne!(a, b);
    }

    #[test]
    fn content_checksum_known_value() {
        let checksum = compute_content_checksum("hello world");
        assert_eq!(
            checksum,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn file_checksum_matches_content_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "hello world").unwrap();

        let file_cs = compute_sha256(&path).unwrap();
        let content_cs = compute_content_checksum("hello world");
        assert_eq!(file_cs, content_cs);
    }

    #[test]
    fn file_checksum_spans_multiple_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let content = "x".repeat(CHUNK_SIZE * 3 + 17);
        std::fs::write(&path, &content).unwrap();

        assert_eq!(compute_sha256(&path).unwrap(), compute_content_checksum(&content));
    }

    #[test]
    fn empty_file_has_empty_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, "").unwrap();

        assert_eq!(
            compute_sha256(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = compute_sha256(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }
}
