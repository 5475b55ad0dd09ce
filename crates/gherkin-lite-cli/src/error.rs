//! Errors raised before any feature file is parsed.
//!
//! Everything here is a usage problem: bad configuration, a bad filter, or
//! a path that cannot be searched. The binary exits with status 2 for these.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use gherkin_lite::FilterError;
use thiserror::Error;

/// Errors that can occur while preparing a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A path given on the command line does not exist.
    #[error("path not found: {0}")]
    PathNotFound(Utf8PathBuf),

    /// A discovered path cannot be represented as UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A `--tags` or `--lines` value could not be parsed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Walking a directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
