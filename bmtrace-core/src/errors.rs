//! errors.rs - Custom error types for the bmtrace-core library.
//!
//! Sink creation never fails from the caller's point of view (it degrades to
//! stderr), so most of these variants surface only through the strict
//! constructors and through `Closer::close`.
//!
//! License: MIT OR APACHE 2.0

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All error types produced by the `bmtrace-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    #[error("Failed to open trace file '{}': {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to close trace file '{}': {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to compile trace rule '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Failed to compile {count} trace rules:\n{details}")]
    RuleSet { count: usize, details: String },

    #[error("The process-wide trace logger has already been initialized")]
    AlreadyInitialized,

    #[error("Failed to render message template: {0}")]
    Template(String),
}
