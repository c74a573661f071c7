use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use skinwatch_extract::Patch;

use crate::error::{ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cache: CacheSettings,
    pub cdragon: CdragonSettings,
    pub wiki: WikiSettings,
    pub mining: MiningSettings,
    /// Lowercased champion alias → lookup key.
    pub substitutions: BTreeMap<String, String>,
    /// Webhook requested once whenever a rebuild is needed.
    pub deploy_hook: Option<String>,
    pub http: HttpSettings,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            cdragon: CdragonSettings::default(),
            wiki: WikiSettings::default(),
            mining: MiningSettings::default(),
            substitutions: BTreeMap::from([("monkeyking".to_string(), "wukong".to_string())]),
            deploy_hook: None,
            http: HttpSettings::default(),
        }
    }
}
impl Settings {
    pub fn validate(&self) -> Result<()> {
        let threshold = self.mining.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            exn::bail!(ErrorKind::Validation {
                field: "mining.threshold",
                reason: format!("{threshold} is outside [0, 1]"),
            });
        }
        if self.mining.concurrency == 0 {
            exn::bail!(ErrorKind::Validation {
                field: "mining.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cdragon.channel.is_empty() || self.cdragon.reference_channel.is_empty() {
            exn::bail!(ErrorKind::Validation {
                field: "cdragon.channel",
                reason: "channels must not be empty".to_string(),
            });
        }
        if let CacheSettings::Local { path } = &self.cache
            && !path.is_absolute()
        {
            exn::bail!(ErrorKind::Validation {
                field: "cache.path",
                reason: format!("{} is not absolute", path.display()),
            });
        }
        Ok(())
    }
}

/// Where the cache lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum CacheSettings {
    /// One JSON file per key in a local directory.
    Local { path: PathBuf },
    /// One object per key in an S3-compatible bucket.
    S3 {
        bucket: String,
        #[serde(default)]
        prefix: Option<String>,
        #[serde(default = "default_region")]
        region: String,
        #[serde(default)]
        endpoint: Option<String>,
        key_id: String,
        key_secret: String,
    },
}
impl Default for CacheSettings {
    fn default() -> Self {
        let path = ProjectDirs::from("", "", "skinwatch")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("skinwatch"));
        Self::Local { path }
    }
}
impl fmt::Display for CacheSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => write!(f, "local:{}", path.display()),
            Self::S3 { bucket, prefix, .. } => match prefix {
                Some(prefix) => write!(f, "s3://{bucket}/{prefix}"),
                None => write!(f, "s3://{bucket}"),
            },
        }
    }
}

fn default_region() -> String {
    "auto".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdragonSettings {
    pub base_url: String,
    /// Channel whose catalog is tracked.
    pub channel: String,
    /// Channel new entities are measured against.
    pub reference_channel: String,
}
impl Default for CdragonSettings {
    fn default() -> Self {
        Self {
            base_url: "https://raw.communitydragon.org".to_string(),
            channel: "pbe".to_string(),
            reference_channel: "latest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    pub base_url: String,
}
impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://leagueoflegends.fandom.com/wiki".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningSettings {
    /// Minimum time between two mining runs.
    pub cooldown_secs: u64,
    /// Champion pages fetched at the same time.
    pub concurrency: usize,
    /// Largest accepted normalized edit distance, in `[0, 1]`.
    pub threshold: f64,
    /// Versions at or below this are never mined.
    pub min_supported: Patch,
    /// Linked name → skin name to look up instead.
    pub aliases: BTreeMap<String, String>,
    /// Linked names that are not skins and should not be warned about.
    pub ignored: BTreeSet<String>,
}
impl Default for MiningSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: 3600,
            concurrency: 10,
            threshold: 0.1,
            min_supported: Patch::new(9, 1),
            aliases: BTreeMap::new(),
            ignored: BTreeSet::new(),
        }
    }
}
impl MiningSettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
}
impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: concat!("skinwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}
impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
