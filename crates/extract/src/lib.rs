//! Release patch ordering and patch history extraction.
//!
//! Everything in this crate is pure: callers hand over the raw bytes of a
//! directory listing or a rendered wiki page and get typed values back. No
//! network access happens here.

mod consts;
pub mod error;
mod history;
pub mod models;
mod patches;

pub use crate::history::{ArtMention, extract_art_mentions};
pub use crate::models::Patch;
pub use crate::patches::{ListingEntry, PatchIndex};
