//! Layered configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults;
//! 2. an optional configuration file (TOML, YAML or JSON, picked by
//!    extension);
//! 3. `SKINWATCH_` environment variables, with `__` separating nested keys
//!    (`SKINWATCH_MINING__CONCURRENCY=4`);
//! 4. the bare `DEPLOY_HOOK` environment variable.

pub mod error;
mod settings;

pub use crate::settings::{CacheSettings, CdragonSettings, HttpSettings, MiningSettings, Settings, WikiSettings};

use std::path::Path;

use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "SKINWATCH_";
const ENV_SEPARATOR: &str = "__";
const DEPLOY_HOOK_VAR: &str = "DEPLOY_HOOK";

/// Load, merge and validate the configuration.
#[instrument]
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(path) = path {
        figment = self::merge_file(figment, path)?;
    }
    let figment = figment
        .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
        .merge(Env::raw().only(&[DEPLOY_HOOK_VAR]));

    let settings: Settings = figment.extract().or_raise(|| ErrorKind::Invalid)?;
    settings.validate()?;
    tracing::debug!(channel = %settings.cdragon.channel, cache = %settings.cache, "configuration loaded");
    Ok(settings)
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.display().to_string()));
    }
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.display().to_string())),
    })
}
