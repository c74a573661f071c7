use serde::{Deserialize, Serialize};
use skinwatch_catalog::ContentVersion;
use time::UtcDateTime;

/// State carried from one run to the next.
///
/// Field names match the long-standing cache layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistentCursor {
    /// When art changes were last mined, in Unix milliseconds. `0` means never.
    pub last_update: i64,
    /// Content version of the last catalog written to the cache.
    pub old_version_string: ContentVersion,
}

impl PersistentCursor {
    /// Whether at least `cooldown_ms` have passed since the last mining run.
    pub fn cooldown_elapsed(&self, now: UtcDateTime, cooldown_ms: i64) -> bool {
        self.last_update.saturating_add(cooldown_ms) <= unix_millis(now)
    }
}

pub(crate) fn unix_millis(at: UtcDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}
