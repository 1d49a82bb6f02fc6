//! Destination naming: slugs, timestamped names and collision suffixes

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{Error, Result};

/// Slug used when nothing filesystem-safe survives slugification.
const FALLBACK_SLUG: &str = "file";

/// Naming settings, deserialized from the `naming` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    /// strftime pattern appended after the slug
    pub timestamp_format: String,
    /// Maximum slug length in bytes
    pub slug_maxlen: usize,
    /// Lowercase the file extension
    pub lower_ext: bool,
    /// Lowercase the slug
    pub lower_slug: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%dT%H%M%S".to_string(),
            slug_maxlen: 60,
            lower_ext: true,
            lower_slug: true,
        }
    }
}

/// Convert text to a filesystem-safe ASCII slug.
///
/// Diacritics are stripped via NFKD decomposition, whitespace runs become a
/// single hyphen, characters outside `[A-Za-z0-9._-]` are dropped, repeated
/// hyphens collapse, and leading/trailing hyphens are trimmed. The result is
/// cut to `max_len` bytes. Returns `"file"` when nothing survives.
pub fn slugify(text: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_dash = true; // Start true to skip leading dashes

    for c in text.nfkd().filter(char::is_ascii) {
        if c.is_whitespace() || c == '-' {
            if !last_was_dash {
                result.push('-');
                last_was_dash = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
            result.push(c);
            last_was_dash = false;
        }
    }

    // Output is pure ASCII, so byte truncation cannot split a char
    result.truncate(max_len);
    let trimmed = result.trim_end_matches('-');

    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split a file name into stem and extension (extension includes the dot).
///
/// Leading dots do not start an extension, so `.bashrc` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].chars().all(|c| c == '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Build `{slug}_{timestamp}{ext}` for an incoming file name.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestampFormat`] if the configured strftime
/// pattern cannot be rendered.
pub fn generate_timestamped_filename(
    original_name: &str,
    naming: &NamingOptions,
    now: NaiveDateTime,
) -> Result<String> {
    let (base, ext) = split_extension(original_name);

    let ext = if naming.lower_ext {
        ext.to_lowercase()
    } else {
        ext.to_string()
    };

    let mut slug = slugify(base, naming.slug_maxlen);
    if naming.lower_slug {
        slug.make_ascii_lowercase();
    }

    let mut timestamp = String::new();
    write!(timestamp, "{}", now.format(&naming.timestamp_format)).map_err(|_| {
        Error::InvalidTimestampFormat {
            format: naming.timestamp_format.clone(),
        }
    })?;

    Ok(format!("{slug}_{timestamp}{ext}"))
}

/// Return a path that does not exist yet, derived from `target`.
///
/// If `target` is free it is returned as is. Otherwise `-a` through `-z`
/// are tried before the extension, then `-1`, `-2`, ... until a free
/// name is found.
pub fn handle_collision(target: &Path) -> PathBuf {
    if !target.exists() {
        return target.to_path_buf();
    }

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_extension(&name);
    let candidate = |suffix: &str| target.with_file_name(format!("{stem}-{suffix}{ext}"));

    for letter in 'a'..='z' {
        let path = candidate(&letter.to_string());
        if !path.exists() {
            return path;
        }
    }

    (1u64..)
        .map(|n| candidate(&n.to_string()))
        .find(|path| !path.exists())
        .unwrap_or_else(|| target.to_path_buf())
}
