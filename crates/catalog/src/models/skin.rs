use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Skins keyed by the decimal string form of their id, matching the object
/// upstream serves.
pub type Skins = BTreeMap<String, Skin>;

/// Skin ids encode their champion: `champion_id * 1000 + index`.
const CHAMPION_ID_FACTOR: u32 = 1000;

/// Split a skin id into `(champion id, skin index)`. Index `0` is the
/// champion's default look.
pub const fn split_id(id: u32) -> (u32, u32) {
    (id / CHAMPION_ID_FACTOR, id % CHAMPION_ID_FACTOR)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_base: bool,
    /// Present on tiered (quest) skins; removed by normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_skin_info: Option<QuestSkinInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestSkinInfo {
    #[serde(default)]
    pub tiers: Vec<SkinTier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tier's own fields override the base skin's when expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinTier {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Skin {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_base: false,
            quest_skin_info: None,
            extra: Map::new(),
        }
    }

    pub fn champion_id(&self) -> u32 {
        split_id(self.id).0
    }

    /// Expand a tiered skin into standalone records: the base first (with
    /// its tier metadata removed), then one record per tier, each being the
    /// base overlaid with the tier's fields. Skins without tiers come back
    /// as-is.
    pub fn expand_tiers(mut self) -> Vec<Skin> {
        let Some(quest) = self.quest_skin_info.take() else {
            return vec![self];
        };
        let mut expanded = Vec::with_capacity(quest.tiers.len() + 1);
        let tiers: Vec<Skin> = quest
            .tiers
            .into_iter()
            .map(|tier| {
                let mut skin = self.clone();
                skin.id = tier.id;
                skin.name = tier.name;
                skin.extra.extend(tier.extra);
                skin
            })
            .collect();
        expanded.push(self);
        expanded.extend(tiers);
        expanded
    }
}
