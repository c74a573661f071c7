use serde::{Deserialize, Serialize};

/// Entities present on the tracked channel but absent from the reference
/// channel. Every list is ordered as the entities appear in the tracked
/// channel's collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedEntitiesReport {
    /// Skin ids, as the string keys of the skin map.
    pub skins: Vec<String>,
    pub champions: Vec<i64>,
    pub skinlines: Vec<i64>,
    pub universes: Vec<i64>,
}
impl AddedEntitiesReport {
    pub fn is_empty(&self) -> bool {
        self.skins.is_empty() && self.champions.is_empty() && self.skinlines.is_empty() && self.universes.is_empty()
    }
}
