//! S3-compatible storage backend.
//!
//! This module provides a remote key-value backend on top of S3-compatible
//! services including AWS S3, Backblaze B2, Tigris (Fly.io), Cloudflare R2
//! and MinIO. Each key is a single `<prefix>/<key>.json` object.
//!
//! # Credentials
//!
//! Credentials are provided explicitly via the configuration file.

use crate::{
    StorageBackend,
    error::{ErrorKind, Result},
    validate_key,
};
use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region, retry::RetryConfig},
    primitives::ByteStream,
};
use exn::ResultExt;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Concurrent S3 requests; the pipeline never has more than a handful of
/// keys in flight.
const DEFAULT_CONCURRENT_REQUESTS: usize = 16;

/// S3-compatible storage backend.
///
/// # Examples
///
/// ```no_run
/// use skinwatch_storage::backend::S3Backend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = S3Backend::new(
///     "remote",
///     "my-bucket",
///     Some("skinwatch".to_string()),
///     "auto",
///     Some("https://<account>.r2.cloudflarestorage.com".to_string()),
///     "access_key_id",
///     "secret_access_key",
/// ).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct S3Backend {
    name: String,
    client: Client,
    bucket: String,
    prefix: Option<String>,
    /// Rate limiter for concurrent S3 requests. Closed by `destroy()`.
    rate_limiter: Arc<Semaphore>,
}

impl S3Backend {
    /// Create a new S3 storage backend.
    ///
    /// # Arguments
    /// * `name` - A name for this backend (used in logging)
    /// * `bucket` - S3 bucket name
    /// * `prefix` - Optional key prefix (acts as virtual directory)
    /// * `region` - AWS region or provider-specific region
    /// * `endpoint` - Custom endpoint URL for S3-compatible services
    /// * `key_id` - AWS/provider access key ID
    /// * `key_secret` - AWS/provider secret access key
    pub async fn new(
        name: impl Into<String>,
        bucket: impl Into<String>,
        prefix: Option<String>,
        region: impl Into<String>,
        endpoint: Option<impl Into<String>>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self> {
        let prefix = prefix.map(|p| p.trim_matches('/').to_string()).filter(|p| !p.is_empty());
        let name = name.into();
        let bucket = bucket.into();
        let region = Region::new(region.into());
        let credentials = Credentials::new(key_id, key_secret, None, None, "skinwatch-config");
        let mut config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(region)
            // Configure retry policy with exponential backoff (1 initial + 3 retries)
            .retry_config(RetryConfig::standard().with_max_attempts(4))
            // Use path-style addressing for better compatibility with
            // S3-compatible services (Backblaze, MinIO, etc.)
            .force_path_style(true);
        // Set custom endpoint for non-AWS services
        if let Some(endpoint_url) = endpoint {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }
        let client = Client::from_conf(config_builder.build());
        let rate_limiter = Arc::new(Semaphore::new(DEFAULT_CONCURRENT_REQUESTS));
        Ok(Self {
            name,
            client,
            bucket,
            prefix,
            rate_limiter,
        })
    }

    /// Construct the full S3 object key for a cache key.
    fn object_key(&self, key: &str) -> Result<String> {
        let key = validate_key(key)?;
        Ok(self::object_key(self.prefix.as_deref(), key))
    }

    /// Acquire a rate limiter permit before making an S3 API call.
    async fn acquire_permit(&self) -> Result<OwnedSemaphorePermit> {
        // The semaphore is only ever closed by destroy().
        self.rate_limiter.clone().acquire_owned().await.or_raise(|| ErrorKind::Destroyed(self.name.clone()))
    }
}

fn object_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}/{key}.json"),
        None => format!("{key}.json"),
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let object = self.object_key(key)?;
        let _permit = self.acquire_permit().await?;
        match self.client.head_object().bucket(&self.bucket).key(&object).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(err).or_raise(|| ErrorKind::Network(format!("HEAD {object}"))),
        }
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let object = self.object_key(key)?;
        let _permit = self.acquire_permit().await?;
        let output = match self.client.get_object().bucket(&self.bucket).key(&object).send().await {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                exn::bail!(ErrorKind::NotFound(key.to_string()))
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Network(format!("GET {object}"))),
        };
        let body = output.body.collect().await.or_raise(|| ErrorKind::Network(format!("GET {object} (body)")))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let object = self.object_key(key)?;
        let _permit = self.acquire_permit().await?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object)
            .content_type("application/json")
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .or_raise(|| ErrorKind::Network(format!("PUT {object}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // S3 deletes are idempotent; check first to keep NotFound semantics
        // consistent with the other backends.
        if !self.exists(key).await? {
            exn::bail!(ErrorKind::NotFound(key.to_string()));
        }
        let object = self.object_key(key)?;
        let _permit = self.acquire_permit().await?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&object)
            .send()
            .await
            .or_raise(|| ErrorKind::Network(format!("DELETE {object}")))?;
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        tracing::debug!(backend = %self.name, "closing S3 request limiter");
        self.rate_limiter.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_without_prefix() {
        assert_eq!(object_key(None, "champions"), "champions.json");
    }

    #[test]
    fn test_object_key_with_prefix() {
        assert_eq!(object_key(Some("skinwatch"), "champions"), "skinwatch/champions.json");
    }

    #[tokio::test]
    async fn test_prefix_is_trimmed() {
        let backend = S3Backend::new("s3", "bucket", Some("/skinwatch/".to_string()), "auto", None::<String>, "id", "secret")
            .await
            .unwrap();
        assert_eq!(backend.object_key("skins").unwrap(), "skinwatch/skins.json");
        assert!(backend.object_key("../skins").is_err());
    }

    #[tokio::test]
    async fn test_destroy_closes_limiter() {
        let backend = S3Backend::new("s3", "bucket", None, "auto", None::<String>, "id", "secret").await.unwrap();
        backend.destroy().await.unwrap();
        let err = backend.acquire_permit().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Destroyed(_)));
    }
}
