use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A skinline or a universe. Both files share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    /// `0` marks the empty placeholder entry.
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
impl Grouping {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}
