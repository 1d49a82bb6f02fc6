//! Filesystem utilities for the research data pipeline
//!
//! Provides the leaf operations the ingestion engine is built from:
//! content hashing, size stabilization, destination naming, safe moves,
//! atomic writes and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod naming;
pub mod path;
pub mod stabilize;

pub use checksum::compute_sha256;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use naming::{NamingOptions, generate_timestamped_filename, handle_collision, slugify, split_extension};
pub use path::{absolute_path, expand_home, expand_home_str, validate_path_identifier};
pub use stabilize::{StabilizeOptions, StabilizeOutcome, stabilize_file};
