//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be constructed.
    #[display("could not build HTTP client")]
    Client,
    /// Connection, TLS or timeout failure before a response arrived.
    #[display("request failed: {_0}")]
    Transport(#[error(not(source))] String),
    /// The server answered with a non-2xx status.
    #[display("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
    /// The body did not decode into the expected records (missing required
    /// fields, wrong types, not JSON at all).
    #[display("malformed response from {_0}")]
    Decode(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Client | Self::Decode(_) => false,
        }
    }
}
