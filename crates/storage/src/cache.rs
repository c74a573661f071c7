//! Typed JSON façade over a [`StorageBackend`](crate::StorageBackend).

use crate::BackendHandle;
use crate::error::{ErrorKind, Result};
use crate::key::validate as validate_key;
use exn::ResultExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// A set of values to be written together with [`Cache::mset`].
///
/// Every value is serialized as it is added, so a value that cannot be
/// encoded is reported before anything reaches the backend.
#[derive(Debug, Default)]
pub struct Batch {
    entries: Vec<(String, Vec<u8>)>,
}
impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; a later value for the same key replaces an earlier one.
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let key = validate_key(key)?.to_string();
        let data = serde_json::to_vec(value).or_raise(|| ErrorKind::InvalidData(key.clone()))?;
        self.entries.retain(|(existing, _)| existing != &key);
        self.entries.push((key, data));
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The cache collaborator: `get` with a default, `set`, `mset` and
/// `destroy`, identical whatever backend sits underneath.
#[derive(Clone)]
pub struct Cache {
    backend: BackendHandle,
}
impl Cache {
    pub fn new(backend: BackendHandle) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Read and decode the value under `key`, or return `default` when
    /// nothing is stored there. A stored value that fails to decode is an
    /// error, not a silent default.
    #[instrument(skip(self, default), fields(backend = self.backend.name()))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.backend.read(key).await {
            Ok(data) => serde_json::from_slice(&data).or_raise(|| ErrorKind::InvalidData(key.to_string())),
            Err(err) if matches!(&*err, ErrorKind::NotFound(_)) => {
                tracing::debug!("cache miss, using default");
                Ok(default)
            },
            Err(err) => Err(err),
        }
    }

    /// [`get`](Self::get) with `T::default()` as the fallback.
    pub async fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        self.get(key, T::default()).await
    }

    #[instrument(skip(self, value), fields(backend = self.backend.name()))]
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let batch = Batch::new().with(key, value)?;
        self.mset(batch).await
    }

    /// Write every value of the batch.
    #[instrument(skip(self, batch), fields(backend = self.backend.name(), keys = batch.len()))]
    pub async fn mset(&self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.backend.write_many(&batch.entries).await?;
        tracing::debug!(keys = ?batch.keys().collect::<Vec<_>>(), "cache updated");
        Ok(())
    }

    /// Release the backend's resources. The cache must not be used afterwards.
    pub async fn destroy(&self) -> Result<()> {
        self.backend.destroy().await
    }
}
