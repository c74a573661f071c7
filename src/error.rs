//! Pipeline Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every one of them aborts the run without advancing the cursor.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration could not be loaded.
    #[display("configuration error")]
    Config,
    /// The cache backend could not be opened, read or written.
    #[display("cache operation failed: {_0}")]
    Cache(#[error(not(source))] &'static str),
    /// The content version of a channel could not be retrieved.
    #[display("could not retrieve the content version of {_0}")]
    ContentVersion(#[error(not(source))] String),
    /// A channel's catalog could not be retrieved in full.
    #[display("could not retrieve the {_0} catalog")]
    Catalog(#[error(not(source))] String),
    /// Mining failed as a whole (not a single champion).
    #[display("art change mining failed")]
    Mining,
    /// The HTTP client could not be built.
    #[display("could not set up HTTP client")]
    Http,
    /// The deploy webhook request failed.
    #[display("deploy notification failed")]
    Deploy,
}
