//! Per-champion mining of patch history pages.

use std::collections::{BTreeMap, BTreeSet};

use exn::ResultExt;
use futures::{StreamExt, stream};
use skinwatch_catalog::net::{Fetch, FetchHandle};
use skinwatch_catalog::{Champion, Skins};
use skinwatch_extract::{Patch, PatchIndex, extract_art_mentions};
use tracing::instrument;

use crate::attribution::{ArtChanges, Attributions};
use crate::error::{ErrorKind, Result};
use crate::matching::{CandidateIndex, DEFAULT_THRESHOLD};
use crate::resolve::{DEFAULT_POLICY, Resolution, Resolver, Step};

/// URL of the CommunityDragon directory listing.
pub fn listing_url(cdragon_base: &str) -> String {
    format!("{}/json", cdragon_base.trim_end_matches('/'))
}

/// URL of a champion's rendered patch history page.
pub fn page_url(wiki_base: &str, champion: &Champion) -> String {
    let title = champion.name.replace(' ', "_");
    format!("{}/{title}/LoL/Patch_history?action=render", wiki_base.trim_end_matches('/'))
}

/// Retrieve and parse the release listing used for predecessor lookups.
#[instrument(skip(fetcher))]
pub async fn fetch_patch_index(fetcher: &dyn Fetch, cdragon_base: &str) -> Result<PatchIndex> {
    let body = fetcher.get(&listing_url(cdragon_base)).await.or_raise(|| ErrorKind::PatchListing)?;
    let index = PatchIndex::from_listing_json(&body).or_raise(|| ErrorKind::PatchListing)?;
    tracing::debug!(patches = index.len(), latest = ?index.latest(), "loaded patch listing");
    Ok(index)
}

#[derive(Debug, Clone)]
pub struct MinerConfig {
    pub wiki_base_url: String,
    /// Champion pages fetched at the same time.
    pub concurrency: usize,
    /// Versions at or below this are not mined.
    pub min_supported: Patch,
    pub threshold: f64,
    pub policy: Vec<Step>,
    /// Linked name → skin name to look up instead.
    pub aliases: BTreeMap<String, String>,
    /// Linked names that are known not to be skins.
    pub ignored: BTreeSet<String>,
}
impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            wiki_base_url: "https://leagueoflegends.fandom.com/wiki".to_string(),
            concurrency: 10,
            min_supported: Patch::new(9, 1),
            threshold: DEFAULT_THRESHOLD,
            policy: DEFAULT_POLICY.to_vec(),
            aliases: BTreeMap::new(),
            ignored: BTreeSet::new(),
        }
    }
}

pub struct ArtMiner {
    fetcher: FetchHandle,
    patches: PatchIndex,
    config: MinerConfig,
}

impl ArtMiner {
    pub fn new(fetcher: FetchHandle, patches: PatchIndex, config: MinerConfig) -> Self {
        Self {
            fetcher,
            patches,
            config,
        }
    }

    /// Mine every champion, at most `concurrency` at a time.
    ///
    /// A champion whose page cannot be fetched or parsed is logged and
    /// skipped. Any other failure aborts the whole run.
    #[instrument(skip_all, fields(champions = champions.len(), concurrency = self.config.concurrency))]
    pub async fn mine_all(&self, champions: &[Champion], skins: &Skins) -> Result<ArtChanges> {
        let mut results = stream::iter(champions)
            .map(|champion| async move { (champion, self.mine_champion(champion, skins).await) })
            .buffer_unordered(self.config.concurrency.max(1));

        let mut attributions = Attributions::default();
        let mut completed = 0;
        while let Some((champion, result)) = results.next().await {
            completed += 1;
            match result {
                Ok(found) => {
                    tracing::debug!(champion = %champion.name, skins = found.len(), completed, "mined champion");
                    attributions.merge(found);
                },
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(champion = %champion.name, error = ?err, "skipping champion");
                },
                Err(err) => return Err(err),
            }
        }
        tracing::info!(skins = attributions.len(), "art change mining complete");
        Ok(attributions.into_changes())
    }

    /// Attributions for a single champion's skins.
    #[instrument(skip_all, fields(champion = %champion.name))]
    pub async fn mine_champion(&self, champion: &Champion, skins: &Skins) -> Result<Attributions> {
        let index = CandidateIndex::new(
            skins.values().filter(|skin| i64::from(skin.champion_id()) == champion.id),
            self.config.threshold,
        );
        let url = page_url(&self.config.wiki_base_url, champion);
        let html = self
            .fetcher
            .get_text(&url)
            .await
            .or_raise(|| ErrorKind::PageFetch(champion.name.clone()))?;
        let mentions =
            extract_art_mentions(&html, self.config.min_supported).or_raise(|| ErrorKind::PageParse(champion.name.clone()))?;

        let resolver = Resolver::new(&self.config.policy, &self.config.aliases, &self.config.ignored);
        let mut attributions = Attributions::default();
        for mention in mentions {
            match resolver.resolve(&index, &mention.name) {
                Resolution::Matched { skin, step } => {
                    // Notes listed under a version describe changes that
                    // shipped in the release before it.
                    let shipped = self
                        .patches
                        .previous(&mention.patch)
                        .or_raise(|| ErrorKind::PatchNotFound(mention.patch))?;
                    tracing::trace!(name = %mention.name, skin = skin.id, %step, patch = %shipped, "matched");
                    attributions.add(skin.id, shipped);
                },
                Resolution::Ignored => {},
                Resolution::Unmatched => {
                    tracing::warn!(champion = %champion.name, name = %mention.name, "no match found");
                },
            }
        }
        Ok(attributions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skinwatch_catalog::Skin;
    use skinwatch_catalog::net::MockFetcher;
    use skinwatch_catalog::normalize::skins_from_list;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CDRAGON: &str = "https://cdragon.test";
    const WIKI: &str = "https://wiki.test/wiki";

    fn patch_index() -> PatchIndex {
        PatchIndex::new(["12.6", "12.5", "12.4", "12.3", "9.1"].map(|p| p.parse::<Patch>().unwrap()))
    }

    fn config() -> MinerConfig {
        MinerConfig {
            wiki_base_url: WIKI.to_string(),
            ignored: BTreeSet::from(["The Darkin Blade".to_string()]),
            ..MinerConfig::default()
        }
    }

    fn aatrox() -> Champion {
        Champion::new(266, "Aatrox", "Aatrox")
    }

    fn skins() -> Skins {
        let mut base = Skin::new(266000, "Aatrox");
        base.is_base = true;
        skins_from_list([base, Skin::new(266001, "Justicar Aatrox"), Skin::new(1001, "Goth Annie")])
    }

    fn page(sections: &[(&str, &str)]) -> String {
        let body: String = sections
            .iter()
            .map(|(version, list)| format!(r#"<dl><dt><a href="/wiki/{version}" title="{version}">{version}</a></dt></dl>{list}"#))
            .collect();
        format!("<html><body>{body}</body></html>")
    }

    fn miner(fetcher: MockFetcher) -> ArtMiner {
        ArtMiner::new(Arc::new(fetcher), patch_index(), config())
    }

    #[test]
    fn test_urls() {
        assert_eq!(listing_url("https://cdragon.test/"), "https://cdragon.test/json");
        let champion = Champion::new(20, "Nunu & Willump", "Nunu");
        assert_eq!(page_url(WIKI, &champion), "https://wiki.test/wiki/Nunu_&_Willump/LoL/Patch_history?action=render");
    }

    #[tokio::test]
    async fn test_fetch_patch_index() {
        let fetcher = MockFetcher::default().with_body(
            "https://cdragon.test/json",
            r#"[{"name":"12.5","type":"directory"},{"name":"latest","type":"directory"},{"name":"12.4","type":"directory"}]"#,
        );
        let index = fetch_patch_index(&fetcher, CDRAGON).await.unwrap();
        assert_eq!(index.iter().copied().collect::<Vec<_>>(), [Patch::new(12, 5), Patch::new(12, 4)]);

        let err = fetch_patch_index(&MockFetcher::default(), CDRAGON).await.unwrap_err();
        assert_eq!(*err, ErrorKind::PatchListing);
    }

    #[tokio::test]
    async fn test_attributes_to_preceding_release() {
        let html = page(&[(
            "V12.5",
            r#"<ul><li>Updated splash art for <a href="/x">Original Aatrox</a>.</li></ul>"#,
        )]);
        let fetcher = MockFetcher::default().with_body(page_url(WIKI, &aatrox()), html);
        let found = miner(fetcher).mine_champion(&aatrox(), &skins()).await.unwrap();
        // Listed under V12.5, shipped in 12.4: never 12.5 and never 12.6.
        assert_eq!(found.into_changes(), ArtChanges::from([("266000".to_string(), vec![Patch::new(12, 4)])]));
    }

    #[tokio::test]
    async fn test_only_own_skins_are_candidates() {
        let html = page(&[(
            "V12.6",
            r#"<ul><li>New splash art for <a href="/x">Goth Annie</a> and <a href="/y">The Darkin Blade</a>.</li></ul>"#,
        )]);
        let fetcher = MockFetcher::default().with_body(page_url(WIKI, &aatrox()), html);
        let found = miner(fetcher).mine_champion(&aatrox(), &skins()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_marker_without_predecessor_is_fatal() {
        let html = page(&[("V12.7", r#"<ul><li>New splash art for <a href="/x">Justicar Aatrox</a>.</li></ul>"#)]);
        let fetcher = MockFetcher::default().with_body(page_url(WIKI, &aatrox()), html);
        let err = miner(fetcher).mine_all(&[aatrox()], &skins()).await.unwrap_err();
        assert_eq!(*err, ErrorKind::PatchNotFound(Patch::new(12, 7)));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        let annie = Champion::new(1, "Annie", "Annie");
        let html = page(&[
            ("V12.6", r#"<ul><li>New splash art for <a href="/x">Justicar Aatrox</a>.</li></ul>"#),
            ("V12.4", r#"<ul><li>Updated splash art for <a href="/x">Justicar Aatrox</a>.</li></ul>"#),
        ]);
        let fetcher = MockFetcher::default()
            .with_body(page_url(WIKI, &aatrox()), html)
            .with_status(page_url(WIKI, &annie), 500);
        let changes = miner(fetcher).mine_all(&[annie, aatrox()], &skins()).await.unwrap();
        assert_eq!(changes, ArtChanges::from([("266001".to_string(), vec![Patch::new(12, 5), Patch::new(12, 3)])]));
    }

    #[tokio::test]
    async fn test_non_history_page_is_recoverable() {
        let fetcher = MockFetcher::default().with_body(page_url(WIKI, &aatrox()), "<html><body><p>Nothing</p></body></html>");
        let miner = miner(fetcher);
        let err = miner.mine_champion(&aatrox(), &skins()).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(miner.mine_all(&[aatrox()], &skins()).await.unwrap().is_empty());
    }

    #[derive(Default)]
    struct CountingFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl Fetch for CountingFetcher {
        async fn get(&self, _url: &str) -> skinwatch_catalog::error::Result<Vec<u8>> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(page(&[("V12.6", "<ul><li>Bug fixes.</li></ul>")]).into_bytes())
        }
    }

    #[tokio::test]
    async fn test_page_fetches_respect_concurrency() {
        let fetcher = Arc::new(CountingFetcher::default());
        let config = MinerConfig { concurrency: 3, ..config() };
        let miner = ArtMiner::new(fetcher.clone(), patch_index(), config);
        let champions: Vec<Champion> = (1..=30).map(|id| Champion::new(id, format!("Champion {id}"), format!("Champion{id}"))).collect();

        let changes = miner.mine_all(&champions, &skins()).await.unwrap();
        assert!(changes.is_empty());
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 30);
        let max = fetcher.max_in_flight.load(Ordering::SeqCst);
        assert!(max > 0 && max <= 3, "{max} pages fetched at once");
    }
}
