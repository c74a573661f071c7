use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Opaque content version string from `content-metadata.json`.
///
/// Only ever compared for equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentVersion(String);
impl ContentVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl From<&str> for ContentVersion {
    fn from(version: &str) -> Self {
        Self(version.to_string())
    }
}

/// The part of `content-metadata.json` the pipeline reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentMetadata {
    pub version: ContentVersion,
}

/// Whether the catalog must be re-fetched. An empty cached version (nothing
/// seen yet) always counts as a change.
pub fn has_changed(current: &ContentVersion, cached: &ContentVersion) -> bool {
    cached.is_empty() || current != cached
}
