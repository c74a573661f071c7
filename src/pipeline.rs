//! One end-to-end run: refresh the catalog when its version moved, mine art
//! changes when the cooldown allows, and report whether anything changed.

use std::time::Duration;

use exn::ResultExt;
use skinwatch_catalog::net::FetchHandle;
use skinwatch_catalog::{CatalogSource, Champion, Skins, diff_added, has_changed};
use skinwatch_changes::{ArtChanges, ArtMiner, MinerConfig, fetch_patch_index};
use skinwatch_storage::{Batch, Cache};
use time::UtcDateTime;
use tracing::instrument;

use crate::cursor::{PersistentCursor, unix_millis};
use crate::error::{ErrorKind, Result};
use crate::keys::CacheKey;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub cdragon_base_url: String,
    /// Channel whose catalog is tracked and cached.
    pub channel: String,
    /// Channel the added-entities report is measured against.
    pub reference_channel: String,
    /// Minimum time between two mining runs.
    pub cooldown: Duration,
    /// Mine even if the cooldown has not elapsed.
    pub force_mining: bool,
    pub miner: MinerConfig,
}

/// What a run found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// A new catalog was fetched and written.
    pub catalog_changed: bool,
    /// Mining ran at all.
    pub mined: bool,
    /// Mining produced a change set different from the cached one.
    pub art_changed: bool,
}
impl Outcome {
    pub fn should_rebuild(&self) -> bool {
        self.catalog_changed || self.art_changed
    }
}

pub struct Pipeline {
    cache: Cache,
    fetcher: FetchHandle,
    source: CatalogSource,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(cache: Cache, fetcher: FetchHandle, source: CatalogSource, options: PipelineOptions) -> Self {
        Self {
            cache,
            fetcher,
            source,
            options,
        }
    }

    /// Run once. Nothing is written unless every step that precedes the
    /// write succeeded, and the cursor is written last.
    #[instrument(skip_all, fields(channel = %self.options.channel, backend = self.cache.backend_name()))]
    pub async fn run(&self, now: UtcDateTime) -> Result<Outcome> {
        let cursor: PersistentCursor = self
            .cache
            .get(CacheKey::PersistentVars.as_str(), PersistentCursor::default())
            .await
            .or_raise(|| ErrorKind::Cache("read cursor"))?;
        let mut next_cursor = cursor.clone();
        let mut outcome = Outcome::default();

        let channel = &self.options.channel;
        let version = self
            .source
            .content_version(channel)
            .await
            .or_raise(|| ErrorKind::ContentVersion(channel.clone()))?;

        let mut fresh: Option<(Vec<Champion>, Skins)> = None;
        if has_changed(&version, &cursor.old_version_string) {
            tracing::info!(old = %cursor.old_version_string, new = %version, "content version changed");
            fresh = Some(self.refresh_catalog().await?);
            next_cursor.old_version_string = version;
            outcome.catalog_changed = true;
        } else {
            tracing::info!(%version, "content version unchanged");
        }

        let cooldown_ms = i64::try_from(self.options.cooldown.as_millis()).unwrap_or(i64::MAX);
        if self.options.force_mining || cursor.cooldown_elapsed(now, cooldown_ms) {
            let (champions, skins) = match fresh {
                Some(catalog) => catalog,
                None => self.cached_champions_and_skins().await?,
            };
            outcome.art_changed = self.mine(&champions, &skins).await?;
            outcome.mined = true;
            next_cursor.last_update = unix_millis(now);
        } else {
            tracing::info!(last_update = cursor.last_update, "mining cooldown has not elapsed");
        }

        if next_cursor != cursor {
            self.cache
                .set(CacheKey::PersistentVars.as_str(), &next_cursor)
                .await
                .or_raise(|| ErrorKind::Cache("write cursor"))?;
        }
        tracing::info!(
            catalog_changed = outcome.catalog_changed,
            mined = outcome.mined,
            art_changed = outcome.art_changed,
            "run complete"
        );
        Ok(outcome)
    }

    /// Fetch both channels, diff them and write the tracked channel's
    /// collections together with the report in a single batch.
    async fn refresh_catalog(&self) -> Result<(Vec<Champion>, Skins)> {
        let (channel, reference) = (&self.options.channel, &self.options.reference_channel);
        let (tracked, against) = futures::try_join!(
            async { self.source.fetch_all(channel).await.or_raise(|| ErrorKind::Catalog(channel.clone())) },
            async { self.source.fetch_all(reference).await.or_raise(|| ErrorKind::Catalog(reference.clone())) },
        )?;
        let added = diff_added(&tracked, &against);
        tracing::info!(
            skins = added.skins.len(),
            champions = added.champions.len(),
            skinlines = added.skinlines.len(),
            universes = added.universes.len(),
            "entities added relative to {reference}"
        );

        let batch = Batch::new()
            .with(CacheKey::Champions.as_str(), &tracked.champions)
            .and_then(|batch| batch.with(CacheKey::Skinlines.as_str(), &tracked.skinlines))
            .and_then(|batch| batch.with(CacheKey::Skins.as_str(), &tracked.skins))
            .and_then(|batch| batch.with(CacheKey::Universes.as_str(), &tracked.universes))
            .and_then(|batch| batch.with(CacheKey::Added.as_str(), &added))
            .or_raise(|| ErrorKind::Cache("serialize catalog"))?;
        self.cache.mset(batch).await.or_raise(|| ErrorKind::Cache("write catalog"))?;
        Ok((tracked.champions, tracked.skins))
    }

    /// Champions and skins from the cache, or from the tracked channel when
    /// the cache has never been filled.
    async fn cached_champions_and_skins(&self) -> Result<(Vec<Champion>, Skins)> {
        let champions: Vec<Champion> = self
            .cache
            .get_or_default(CacheKey::Champions.as_str())
            .await
            .or_raise(|| ErrorKind::Cache("read champions"))?;
        let skins: Skins = self
            .cache
            .get_or_default(CacheKey::Skins.as_str())
            .await
            .or_raise(|| ErrorKind::Cache("read skins"))?;
        if !champions.is_empty() && !skins.is_empty() {
            return Ok((champions, skins));
        }

        tracing::info!("no cached catalog, fetching champions and skins");
        let channel = &self.options.channel;
        futures::try_join!(self.source.champions(channel), self.source.skins(channel))
            .or_raise(|| ErrorKind::Catalog(channel.clone()))
    }

    /// Mine, compare with the cached change set and persist on difference.
    async fn mine(&self, champions: &[Champion], skins: &Skins) -> Result<bool> {
        let patches = fetch_patch_index(&*self.fetcher, &self.options.cdragon_base_url)
            .await
            .or_raise(|| ErrorKind::Mining)?;
        let miner = ArtMiner::new(self.fetcher.clone(), patches, self.options.miner.clone());
        let changes = miner.mine_all(champions, skins).await.or_raise(|| ErrorKind::Mining)?;

        let cached: ArtChanges = self
            .cache
            .get_or_default(CacheKey::Changes.as_str())
            .await
            .or_raise(|| ErrorKind::Cache("read changes"))?;
        if !skinwatch_changes::has_changed(&changes, &cached) {
            tracing::info!(skins = changes.len(), "art changes unchanged");
            return Ok(false);
        }
        self.cache
            .set(CacheKey::Changes.as_str(), &changes)
            .await
            .or_raise(|| ErrorKind::Cache("write changes"))?;
        tracing::info!(skins = changes.len(), "art changes updated");
        Ok(true)
    }
}
