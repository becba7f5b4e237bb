//! Top-level Error Types
//!
//! Everything that reaches this level is fatal: the process exits non-zero.
//! Recoverable problems (missing metadata, unreadable object directories) are
//! handled inside the library crates and never surface here.

use derive_more::{Display, Error};

/// A fatal error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the command-line entrypoint.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not determine working directory")]
    WorkingDirectory,
    #[display("could not load configuration")]
    Config,
    #[display("could not build manifest")]
    Build,
    #[display("could not write manifest")]
    Write,
}
