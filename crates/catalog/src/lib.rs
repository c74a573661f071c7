//! The CommunityDragon game-data catalog.
//!
//! Four collections are tracked per release channel: champions, skinlines,
//! universes and skins. This crate knows how to fetch them
//! ([`CatalogSource`]), how to normalize them into the shape the rest of the
//! pipeline expects ([`normalize`]), and how to tell which entities are new
//! compared to another channel ([`diff_added`]).

mod diff;
pub mod error;
pub mod models;
pub mod net;
pub mod normalize;
mod source;

pub use crate::diff::diff_added;
pub use crate::models::{
    AddedEntitiesReport, Catalog, Champion, ContentVersion, Grouping, Skin, Skins, has_changed, split_id,
};
pub use crate::source::{CatalogSource, GroupingKind, Resource};
