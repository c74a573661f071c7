//! Watches the CommunityDragon game-data catalog and the champions' patch
//! history pages, keeps a cache of both up to date, and reports whether the
//! site built from that cache needs to be rebuilt.

pub mod backend;
mod cursor;
pub mod deploy;
pub mod error;
mod keys;
mod pipeline;

pub use crate::cursor::PersistentCursor;
pub use crate::keys::CacheKey;
pub use crate::pipeline::{Outcome, Pipeline, PipelineOptions};
