use std::collections::HashSet;
use std::hash::Hash;

use tracing::instrument;

use crate::models::{AddedEntitiesReport, Catalog};

/// Report the entities present in `tracked` but not in `reference`.
///
/// Identity is the entity id alone; an entity renamed between channels is not
/// "added". Removals are not reported.
#[instrument(skip_all)]
pub fn diff_added(tracked: &Catalog, reference: &Catalog) -> AddedEntitiesReport {
    let report = AddedEntitiesReport {
        skins: self::added(tracked.skins.keys().cloned(), reference.skins.keys().cloned()),
        champions: self::added(tracked.champions.iter().map(|c| c.id), reference.champions.iter().map(|c| c.id)),
        skinlines: self::added(tracked.skinlines.iter().map(|g| g.id), reference.skinlines.iter().map(|g| g.id)),
        universes: self::added(tracked.universes.iter().map(|g| g.id), reference.universes.iter().map(|g| g.id)),
    };
    tracing::debug!(
        skins = report.skins.len(),
        champions = report.champions.len(),
        skinlines = report.skinlines.len(),
        universes = report.universes.len(),
        "computed added entities"
    );
    report
}

fn added<K: Eq + Hash>(tracked: impl Iterator<Item = K>, reference: impl Iterator<Item = K>) -> Vec<K> {
    let known: HashSet<K> = reference.collect();
    tracked.filter(|id| !known.contains(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Champion, Grouping, Skin};
    use crate::normalize::skins_from_list;

    fn catalog(champions: &[i64], skins: &[u32], skinlines: &[i64], universes: &[i64]) -> Catalog {
        Catalog {
            champions: champions.iter().map(|id| Champion::new(*id, format!("c{id}"), format!("c{id}"))).collect(),
            skinlines: skinlines.iter().map(|id| Grouping::new(*id, format!("l{id}"))).collect(),
            skins: skins_from_list(skins.iter().map(|id| Skin::new(*id, format!("s{id}")))),
            universes: universes.iter().map(|id| Grouping::new(*id, format!("u{id}"))).collect(),
        }
    }

    #[test]
    fn test_added_entities() {
        let tracked = catalog(&[1, 2, 3], &[1000, 1001, 2000], &[10, 11], &[5]);
        let reference = catalog(&[1, 2], &[1000, 2000], &[10], &[5, 6]);
        let report = diff_added(&tracked, &reference);
        assert_eq!(
            report,
            AddedEntitiesReport {
                skins: vec!["1001".to_string()],
                champions: vec![3],
                skinlines: vec![11],
                universes: vec![],
            }
        );
    }

    #[test]
    fn test_renamed_entity_is_not_added() {
        let tracked = catalog(&[1], &[], &[], &[]);
        let mut reference = tracked.clone();
        reference.champions[0].name = "Renamed".to_string();
        assert!(diff_added(&tracked, &reference).is_empty());
    }

    #[test]
    fn test_order_follows_tracked_collection() {
        let tracked = catalog(&[9, 4, 7], &[], &[], &[]);
        let report = diff_added(&tracked, &Catalog::default());
        assert_eq!(report.champions, [9, 4, 7]);
    }
}
