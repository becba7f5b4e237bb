//! Metadata Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. None of these are fatal to a manifest
//! run: [`MetadataIndex::build`](crate::MetadataIndex::build) swallows them and
//! carries on with blank titles.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A metadata error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The metadata file does not exist.
    #[display("metadata file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The file exists but could not be read (permissions, is a directory,
    /// I/O failure part-way through).
    #[display("metadata file could not be read")]
    Unreadable,
    /// The file was read but isn't valid CSV (or isn't UTF-8).
    #[display("metadata file is not valid CSV")]
    Malformed,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreadable)
    }
}
