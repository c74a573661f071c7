//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait, which provides a unified
//! key-value interface across different backends (local filesystem,
//! S3-compatible services, etc.).

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(feature = "s3")]
mod s3;

pub use self::local::LocalBackend;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockBackend;
#[cfg(feature = "s3")]
pub use self::s3::S3Backend;
use crate::error::Result;
use async_trait::async_trait;

/// Unified interface for storage backends.
///
/// All storage operations are asynchronous to efficiently handle network
/// operations. Values are opaque bytes; see [`Cache`](crate::Cache) for the
/// typed layer on top.
///
/// # Key Handling
/// Keys must be validated using [`validate_key`](crate::validate_key) before
/// use. Implementations should enforce this validation.
///
/// # Examples
///
/// ```
/// use skinwatch_storage::{backend::StorageBackend, error::Result};
///
/// async fn size_of_champions(backend: &dyn StorageBackend) -> Result<u64> {
///     if backend.exists("champions").await? {
///         let data = backend.read("champions").await?;
///         Ok(data.len() as u64)
///     } else {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend. Used for logging only.
    fn name(&self) -> &str;

    /// Check if a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Read the value stored under `key`.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if nothing is
    /// stored under the key.
    async fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Store `data` under `key`, replacing any previous value.
    async fn write(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Store several values.
    ///
    /// Default implementation issues every write concurrently and fails if
    /// any of them fails.
    async fn write_many(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        futures::future::try_join_all(entries.iter().map(|(key, data)| self.write(key, data))).await?;
        Ok(())
    }

    /// Remove the value stored under `key`.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if nothing is
    /// stored under the key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Release any resources held by the backend (connections, permits).
    /// The backend should not be used afterwards.
    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}
