use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A playable character, as listed in `champion-summary.json`.
///
/// Only the fields the pipeline reads are typed; everything else upstream
/// sends is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    /// `-1` marks the "None" placeholder entry.
    pub id: i64,
    pub name: String,
    /// Internal name, e.g. `MonkeyKing` for Wukong.
    pub alias: String,
    /// Lowercased lookup key derived from `alias` during normalization.
    #[serde(default)]
    pub key: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
impl Champion {
    pub fn new(id: i64, name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alias: alias.into(),
            key: String::new(),
            extra: Map::new(),
        }
    }
}
