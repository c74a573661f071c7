//! Fetching catalog collections from CommunityDragon.

use std::collections::BTreeMap;

use derive_more::Display;
use tracing::instrument;

use crate::error::Result;
use crate::models::{Catalog, Champion, ContentMetadata, ContentVersion, Grouping, Skins};
use crate::net::{FetchHandle, get_json};
use crate::normalize;

/// Where the game-data files live below a channel.
const DATA_PATH: &str = "plugins/rcp-be-lol-game-data/global/default/v1";
const METADATA_FILE: &str = "content-metadata.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    #[display("champion-summary.json")]
    ChampionSummary,
    #[display("skinlines.json")]
    Skinlines,
    #[display("skins.json")]
    Skins,
    #[display("universes.json")]
    Universes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GroupingKind {
    #[display("skinlines")]
    Skinlines,
    #[display("universes")]
    Universes,
}
impl GroupingKind {
    fn resource(self) -> Resource {
        match self {
            Self::Skinlines => Resource::Skinlines,
            Self::Universes => Resource::Universes,
        }
    }
}

/// Reads one or more channels of CommunityDragon game data and returns it
/// normalized.
#[derive(Clone)]
pub struct CatalogSource {
    fetcher: FetchHandle,
    base_url: String,
    substitutions: BTreeMap<String, String>,
}
impl CatalogSource {
    pub fn new(fetcher: FetchHandle, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            substitutions: BTreeMap::new(),
        }
    }

    /// Alias → key replacements applied when deriving champion keys.
    pub fn with_substitutions(mut self, substitutions: BTreeMap<String, String>) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn resource_url(&self, channel: &str, resource: Resource) -> String {
        format!("{}/{channel}/{DATA_PATH}/{resource}", self.base_url)
    }

    pub fn metadata_url(&self, channel: &str) -> String {
        format!("{}/{channel}/{METADATA_FILE}", self.base_url)
    }

    #[instrument(skip(self))]
    pub async fn content_version(&self, channel: &str) -> Result<ContentVersion> {
        let metadata: ContentMetadata = get_json(&*self.fetcher, &self.metadata_url(channel)).await?;
        tracing::debug!(version = %metadata.version, "fetched content version");
        Ok(metadata.version)
    }

    #[instrument(skip(self))]
    pub async fn champions(&self, channel: &str) -> Result<Vec<Champion>> {
        let url = self.resource_url(channel, Resource::ChampionSummary);
        let raw: Vec<Champion> = get_json(&*self.fetcher, &url).await?;
        Ok(normalize::champions(raw, &self.substitutions))
    }

    #[instrument(skip(self))]
    pub async fn groupings(&self, channel: &str, kind: GroupingKind) -> Result<Vec<Grouping>> {
        let url = self.resource_url(channel, kind.resource());
        let raw: Vec<Grouping> = get_json(&*self.fetcher, &url).await?;
        Ok(normalize::groupings(raw))
    }

    pub async fn skinlines(&self, channel: &str) -> Result<Vec<Grouping>> {
        self.groupings(channel, GroupingKind::Skinlines).await
    }

    pub async fn universes(&self, channel: &str) -> Result<Vec<Grouping>> {
        self.groupings(channel, GroupingKind::Universes).await
    }

    #[instrument(skip(self))]
    pub async fn skins(&self, channel: &str) -> Result<Skins> {
        let url = self.resource_url(channel, Resource::Skins);
        let raw: Skins = get_json(&*self.fetcher, &url).await?;
        Ok(normalize::skins(raw))
    }

    /// Fetch all four collections of a channel concurrently. The first
    /// failure aborts the rest.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self, channel: &str) -> Result<Catalog> {
        let (champions, skinlines, skins, universes) = futures::try_join!(
            self.champions(channel),
            self.skinlines(channel),
            self.skins(channel),
            self.universes(channel),
        )?;
        tracing::info!(
            champions = champions.len(),
            skinlines = skinlines.len(),
            skins = skins.len(),
            universes = universes.len(),
            "fetched catalog"
        );
        Ok(Catalog {
            champions,
            skinlines,
            skins,
            universes,
        })
    }
}
