//! Normalization of raw upstream collections.
//!
//! Upstream files contain placeholder sentinels, are in no useful order, and
//! describe tiered skins as a single nested record. Everything downstream
//! works on the normalized form produced here.

use std::collections::BTreeMap;

use crate::models::{Champion, Grouping, Skin, Skins};

/// Id of the placeholder "None" champion.
pub const CHAMPION_SENTINEL_ID: i64 = -1;
/// Id of the empty placeholder skinline and universe.
pub const GROUPING_SENTINEL_ID: i64 = 0;
/// Prefix given to every base skin so it reads like the wiki's naming.
pub const ORIGINAL_PREFIX: &str = "Original ";

/// Lowercased alias, replaced through `substitutions` when the lowercased
/// alias has an entry (e.g. `monkeyking` → `wukong`).
pub fn champion_key(alias: &str, substitutions: &BTreeMap<String, String>) -> String {
    let key = alias.to_lowercase();
    substitutions.get(&key).cloned().unwrap_or(key)
}

/// Drop the sentinel, sort by name and derive each champion's key.
pub fn champions(raw: Vec<Champion>, substitutions: &BTreeMap<String, String>) -> Vec<Champion> {
    let mut champions: Vec<Champion> = raw
        .into_iter()
        .filter(|champion| champion.id != CHAMPION_SENTINEL_ID)
        .map(|mut champion| {
            champion.key = champion_key(&champion.alias, substitutions);
            champion
        })
        .collect();
    champions.sort_by(|a, b| a.name.cmp(&b.name));
    champions
}

/// Drop the sentinel and sort by name. Used for skinlines and universes.
pub fn groupings(raw: Vec<Grouping>) -> Vec<Grouping> {
    let mut groupings: Vec<Grouping> = raw.into_iter().filter(|g| g.id != GROUPING_SENTINEL_ID).collect();
    groupings.sort_by(|a, b| a.name.cmp(&b.name));
    groupings
}

/// `"Original "` + name, unless the name already carries the prefix.
pub fn original_name(name: &str) -> String {
    if name.starts_with(ORIGINAL_PREFIX) {
        name.to_string()
    } else {
        format!("{ORIGINAL_PREFIX}{name}")
    }
}

/// Rename base skins and flatten every tiered skin into standalone records
/// keyed by their own ids.
///
/// When a tier shares its id with the skin it belongs to, the tier record
/// wins. Running this on already-normalized data changes nothing.
pub fn skins(raw: Skins) -> Skins {
    let mut normalized = Skins::new();
    for (_, mut skin) in raw {
        if skin.is_base {
            skin.name = original_name(&skin.name);
        }
        for expanded in skin.expand_tiers() {
            normalized.insert(expanded.id.to_string(), expanded);
        }
    }
    normalized
}

/// Convenience for callers holding a plain list.
pub fn skins_from_list(raw: impl IntoIterator<Item = Skin>) -> Skins {
    self::skins(raw.into_iter().map(|skin| (skin.id.to_string(), skin)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestSkinInfo, SkinTier};
    use rstest::rstest;
    use serde_json::Map;

    fn substitutions() -> BTreeMap<String, String> {
        BTreeMap::from([("monkeyking".to_string(), "wukong".to_string())])
    }

    #[rstest]
    #[case("MonkeyKing", "wukong")]
    #[case("Aatrox", "aatrox")]
    #[case("KSante", "ksante")]
    fn test_champion_key(#[case] alias: &str, #[case] expected: &str) {
        assert_eq!(champion_key(alias, &substitutions()), expected);
    }

    #[test]
    fn test_champions_drop_sentinel_and_sort() {
        let raw = vec![
            Champion::new(-1, "None", "None"),
            Champion::new(62, "Wukong", "MonkeyKing"),
            Champion::new(266, "Aatrox", "Aatrox"),
        ];
        let champions = champions(raw, &substitutions());
        assert_eq!(champions.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), ["Aatrox", "Wukong"]);
        assert_eq!(champions[1].key, "wukong");
    }

    #[test]
    fn test_name_sort_is_ordinal() {
        let raw = vec![Grouping::new(2, "lowercase"), Grouping::new(3, "Zed"), Grouping::new(0, ""), Grouping::new(1, "Arcade")];
        let names: Vec<_> = groupings(raw).into_iter().map(|g| g.name).collect();
        assert_eq!(names, ["Arcade", "Zed", "lowercase"]);
    }

    #[rstest]
    #[case("Aatrox", "Original Aatrox")]
    #[case("Original Aatrox", "Original Aatrox")]
    fn test_original_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(original_name(name), expected);
    }

    fn tiered(id: u32, tiers: &[(u32, &str)]) -> Skin {
        let mut skin = Skin::new(id, "Prestige");
        skin.quest_skin_info = Some(QuestSkinInfo {
            tiers: tiers
                .iter()
                .map(|(id, name)| SkinTier {
                    id: *id,
                    name: name.to_string(),
                    extra: Map::new(),
                })
                .collect(),
            extra: Map::new(),
        });
        skin
    }

    #[test]
    fn test_skins_rename_base_and_expand_tiers() {
        let mut base = Skin::new(266000, "Aatrox");
        base.is_base = true;
        let raw = vec![base, tiered(266020, &[(266021, "Tier One"), (266022, "Tier Two")])];

        let skins = skins_from_list(raw);
        assert_eq!(skins.keys().collect::<Vec<_>>(), ["266000", "266020", "266021", "266022"]);
        assert_eq!(skins["266000"].name, "Original Aatrox");
        assert_eq!(skins["266020"].name, "Prestige");
        assert!(skins["266020"].quest_skin_info.is_none());
        assert_eq!(skins["266022"].name, "Tier Two");
    }

    #[test]
    fn test_tier_sharing_base_id_wins() {
        let skins = skins_from_list([tiered(145020, &[(145020, "Final Form"), (145021, "Second")])]);
        assert_eq!(skins.len(), 2);
        assert_eq!(skins["145020"].name, "Final Form");
    }

    #[test]
    fn test_skins_normalization_is_idempotent() {
        let mut base = Skin::new(1000, "Annie");
        base.is_base = true;
        let once = skins_from_list([base, tiered(1020, &[(1021, "Tier")])]);
        let twice = skins(once.clone());
        assert_eq!(once, twice);
    }
}
