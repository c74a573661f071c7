//! Local filesystem storage backend.
//!
//! This module provides a storage backend implementation for the local filesystem.
//! Each key is stored as a `<key>.json` file in a configured directory and
//! accessed via `tokio::fs` for async I/O.

use crate::error::ErrorKind;
use crate::{StorageBackend, error::Result, key::validate as validate_key};
use async_trait::async_trait;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;

const EXTENSION: &str = "json";

/// Local filesystem storage backend.
///
/// Stores values as files in a directory on the local filesystem. Writes go
/// to a temporary file first and are renamed into place, so a crash never
/// leaves a half-written value behind.
///
/// # Examples
///
/// ```no_run
/// use skinwatch_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("local", "/var/cache/skinwatch")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Directory holding one file per key
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Arguments
    /// * `root` - Absolute path to the cache directory; created if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, or exists but is not a
    /// directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::BackendError(format!("cache root must be absolute: {}", root.display())));
        }

        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::BackendError(format!("cache root is not a directory: {}", root.display())));
            }
        } else {
            // Use non-async here; it'll only happen once on startup and it's
            // not worth the hassle of making the constructor async.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, root.display().to_string()))?;
        }

        Ok(Self { name: name.into(), root })
    }

    /// Get the absolute file path for a key.
    fn file_path(&self, key: &str) -> Result<PathBuf> {
        let key = validate_key(key)?;
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    /// Temporary sibling used while writing a key. Starts with a dot so it
    /// can never collide with a valid key's file.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{key}.{EXTENSION}.tmp"))
    }

    fn map_io_error(e: std::io::Error, key: impl Into<String>) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(key.into()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(key.into()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.file_path(key)?;
        Ok(fs::try_exists(&path).await.map_err(ErrorKind::Io)?)
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.file_path(key)?;
        Ok(fs::read(&path).await.map_err(|e| Self::map_io_error(e, key))?)
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.file_path(key)?;
        let temp = self.temp_path(key);
        fs::write(&temp, data).await.map_err(|e| Self::map_io_error(e, key))?;
        Ok(fs::rename(&temp, &path).await.map_err(|e| Self::map_io_error(e, key))?)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.file_path(key)?;
        Ok(fs::remove_file(&path).await.map_err(|e| Self::map_io_error(e, key))?)
    }
}
