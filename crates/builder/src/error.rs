//! Manifest Builder Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A manifest error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a manifest failure.
///
/// ### Fatal
/// - [`ErrorKind::WorkingDirectory`]
/// - [`ErrorKind::OutputWrite`]
///
/// ### Recovered
/// - [`ErrorKind::Listing`] - the builder substitutes a placeholder for the
///   directory's file list and carries on with the next directory.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The directory holding the digital objects could not be enumerated.
    #[display("could not read working directory: {}", _0.display())]
    WorkingDirectory(#[error(not(source))] PathBuf),
    /// The contents of a single digital object directory could not be listed.
    #[display("could not list directory contents: {}", _0.display())]
    Listing(#[error(not(source))] PathBuf),
    /// The manifest could not be created, written, or moved into place.
    #[display("could not write manifest: {}", _0.display())]
    OutputWrite(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // All of these are I/O underneath; a permissions fix or a remount
        // might be all it takes.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::OutputWrite(PathBuf::from("/tmp/manifest.csv")).to_string(),
            "could not write manifest: /tmp/manifest.csv"
        );
        assert_eq!(ErrorKind::Listing(PathBuf::from("A1")).to_string(), "could not list directory contents: A1");
    }
}
