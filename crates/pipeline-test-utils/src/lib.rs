//! Shared test utilities for the research data pipeline workspace.
//!
//! This crate provides a standard on-disk fixture so crate test suites do
//! not each rebuild the same temp layout. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] with projects base, downloads folder
//!   and a generated config file

pub mod workspace;

pub use workspace::TestWorkspace;
