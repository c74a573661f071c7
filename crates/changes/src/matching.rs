//! Fuzzy lookup of a champion's skins by display name.

use skinwatch_catalog::Skin;

/// Largest accepted normalized edit distance between a query and a skin name.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Lowercase, drop punctuation and collapse whitespace, so `"K/DA  Kai'Sa"`
/// and `"kda kaisa"` compare equal.
pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One champion's skins, prepared for repeated fuzzy lookups.
#[derive(Debug)]
pub struct CandidateIndex<'s> {
    /// Sorted by skin id so the first best match is the lowest id.
    entries: Vec<(String, &'s Skin)>,
    threshold: f64,
}

impl<'s> CandidateIndex<'s> {
    pub fn new(skins: impl IntoIterator<Item = &'s Skin>, threshold: f64) -> Self {
        let mut entries: Vec<_> = skins.into_iter().map(|skin| (normalize_name(&skin.name), skin)).collect();
        entries.sort_by_key(|(_, skin)| skin.id);
        Self { entries, threshold }
    }

    /// The single closest skin whose distance from `query` is within the
    /// threshold. Ties go to the lowest skin id.
    pub fn best_match(&self, query: &str) -> Option<&'s Skin> {
        let query = normalize_name(query);
        if query.is_empty() {
            return None;
        }
        let mut best: Option<(f64, &'s Skin)> = None;
        for (name, skin) in &self.entries {
            let distance = 1.0 - strsim::normalized_levenshtein(&query, name);
            if distance > self.threshold {
                continue;
            }
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, skin));
            }
        }
        best.map(|(_, skin)| skin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("K/DA ALL OUT Kai'Sa", "kda all out kaisa")]
    #[case("  Original   Aatrox ", "original aatrox")]
    #[case("Dr. Mundo", "dr mundo")]
    #[case("!!!", "")]
    fn test_normalize_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(input), expected);
    }

    fn skins() -> Vec<Skin> {
        vec![
            Skin::new(266000, "Original Aatrox"),
            Skin::new(266001, "Justicar Aatrox"),
            Skin::new(266002, "Mecha Aatrox"),
            Skin::new(266003, "Sea Hunter Aatrox"),
        ]
    }

    #[rstest]
    #[case("Justicar Aatrox", Some(266001))]
    #[case("justicar aatrox", Some(266001))]
    #[case("Mecha  Aatrox.", Some(266002))]
    #[case("Mecha Aatrx", Some(266002))]
    #[case("Aatrox", None)]
    #[case("Blood Moon Aatrox", None)]
    #[case("", None)]
    fn test_best_match(#[case] query: &str, #[case] expected: Option<u32>) {
        let skins = skins();
        let index = CandidateIndex::new(&skins, DEFAULT_THRESHOLD);
        assert_eq!(index.best_match(query).map(|skin| skin.id), expected);
    }

    #[test]
    fn test_bare_champion_name_does_not_match_base_skin() {
        let skins = vec![Skin::new(266000, "Original Aatrox"), Skin::new(266001, "Justicar Aatrox")];
        let index = CandidateIndex::new(&skins, DEFAULT_THRESHOLD);
        assert!(index.best_match("Aatrox").is_none());
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        let skins = vec![Skin::new(1005, "Goth Annie"), Skin::new(1002, "Goth Annie")];
        let index = CandidateIndex::new(&skins, DEFAULT_THRESHOLD);
        assert_eq!(index.best_match("Goth Annie").map(|skin| skin.id), Some(1002));
    }

    #[test]
    fn test_zero_threshold_requires_exact_normalized_name() {
        let skins = skins();
        let index = CandidateIndex::new(&skins, 0.0);
        assert!(index.best_match("Mecha Aatrx").is_none());
        assert_eq!(index.best_match("MECHA AATROX").map(|skin| skin.id), Some(266002));
    }
}
