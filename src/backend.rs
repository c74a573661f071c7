//! Opening the configured cache backend.

use std::sync::Arc;

use exn::ResultExt;
use skinwatch_config::CacheSettings;
use skinwatch_storage::BackendHandle;
use skinwatch_storage::backend::LocalBackend;

use crate::error::{ErrorKind, Result};

pub async fn open(settings: &CacheSettings) -> Result<BackendHandle> {
    match settings {
        CacheSettings::Local { path } => {
            let backend = LocalBackend::new("local", path).or_raise(|| ErrorKind::Cache("open local backend"))?;
            Ok(Arc::new(backend))
        },
        #[cfg(feature = "s3")]
        CacheSettings::S3 {
            bucket,
            prefix,
            region,
            endpoint,
            key_id,
            key_secret,
        } => {
            let backend = skinwatch_storage::backend::S3Backend::new(
                "s3",
                bucket.as_str(),
                prefix.clone(),
                region.as_str(),
                endpoint.clone(),
                key_id.as_str(),
                key_secret.as_str(),
            )
            .await
            .or_raise(|| ErrorKind::Cache("open s3 backend"))?;
            Ok(Arc::new(backend))
        },
        #[cfg(not(feature = "s3"))]
        CacheSettings::S3 { .. } => {
            tracing::error!("the s3 cache backend requires building with the `s3` feature");
            exn::bail!(ErrorKind::Config)
        },
    }
}
