//! Skin art change mining.
//!
//! For every champion the rendered "Patch history" wiki page is scanned for
//! art-change bullets, each linked name is fuzzy-matched against that
//! champion's skins, and the skin is attributed to the release preceding the
//! version the bullet was listed under.

mod attribution;
pub mod error;
mod matching;
mod miner;
mod resolve;

pub use crate::attribution::{ArtChanges, Attributions, has_changed};
pub use crate::matching::{CandidateIndex, DEFAULT_THRESHOLD, normalize_name};
pub use crate::miner::{ArtMiner, MinerConfig, fetch_patch_index, listing_url, page_url};
pub use crate::resolve::{DEFAULT_POLICY, Resolution, Resolver, Step};
