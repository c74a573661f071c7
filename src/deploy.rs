//! Rebuild notification.

use exn::ResultExt;
use skinwatch_catalog::net::Fetch;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Request the deploy webhook once. Returns whether a request was made; a
/// missing hook is only a warning.
#[instrument(skip_all)]
pub async fn notify(fetcher: &dyn Fetch, hook: Option<&str>) -> Result<bool> {
    let Some(hook) = hook.filter(|hook| !hook.is_empty()) else {
        tracing::warn!("no deploy hook configured, skipping notification");
        return Ok(false);
    };
    fetcher.get(hook).await.or_raise(|| ErrorKind::Deploy)?;
    tracing::info!("deploy hook triggered");
    Ok(true)
}
