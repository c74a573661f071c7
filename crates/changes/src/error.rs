//! Mining Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use skinwatch_extract::Patch;

/// A mining error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for mining operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The CommunityDragon directory listing could not be retrieved or read.
    #[display("could not load the patch listing")]
    PatchListing,
    /// A champion's patch history page could not be retrieved.
    #[display("could not fetch patch history for {_0}")]
    PageFetch(#[error(not(source))] String),
    /// A champion's patch history page is not a patch history page.
    #[display("could not parse patch history for {_0}")]
    PageParse(#[error(not(source))] String),
    /// A version marker has no preceding release in the patch listing.
    #[display("no release precedes {_0}")]
    PatchNotFound(#[error(not(source))] Patch),
}

impl ErrorKind {
    /// Returns `true` if the failure only affects a single champion and the
    /// run may carry on without its contribution.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PageFetch(_) | Self::PageParse(_))
    }
}
