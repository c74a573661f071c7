use std::collections::{BTreeMap, BTreeSet};

use skinwatch_extract::Patch;

/// Persisted form: skin id → releases with art changes, newest first.
pub type ArtChanges = BTreeMap<String, Vec<Patch>>;

/// Whether freshly mined changes differ from the cached ones. The comparison
/// is structural and order-sensitive.
pub fn has_changed(fresh: &ArtChanges, cached: &ArtChanges) -> bool {
    fresh != cached
}

/// Accumulated per-skin patch sets. Merging is a set union, so results from
/// concurrent workers can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributions(BTreeMap<String, BTreeSet<Patch>>);

impl Attributions {
    pub fn add(&mut self, skin_id: u32, patch: Patch) {
        self.0.entry(skin_id.to_string()).or_default().insert(patch);
    }

    pub fn merge(&mut self, other: Attributions) {
        for (skin, patches) in other.0 {
            self.0.entry(skin).or_default().extend(patches);
        }
    }

    /// Number of skins with at least one attribution.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_changes(self) -> ArtChanges {
        self.0.into_iter().map(|(skin, patches)| (skin, patches.into_iter().rev().collect())).collect()
    }
}
