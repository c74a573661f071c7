//! In-memory storage backend for testing.

use crate::error::{ErrorKind, Result};
use crate::key::validate as validate_key;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::StorageBackend;

/// In-memory storage backend for testing.
///
/// Values are stored in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Every successful
/// write is also appended to a journal so tests can assert on *what* was
/// written, not just the end state.
///
/// # Examples
///
/// ```
/// use skinwatch_storage::backend::{MockBackend, StorageBackend};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_entries([("champions", b"[]")]);
/// assert!(backend.exists("champions").await?);
///
/// backend.write("skins", b"{}").await?;
/// assert_eq!(backend.written_keys().await, ["skins"]);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<HashMap<String, Vec<u8>>>,
    journal: RwLock<Vec<String>>,
    destroyed: AtomicBool,
}

impl MockBackend {
    /// Create a mock backend pre-populated with values.
    ///
    /// Panics if any key fails validation. If test setup is wrong, then test
    /// should not pass.
    pub fn with_entries(entries: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = HashMap::new();
        for (key, data) in entries {
            let key = key.into();
            if validate_key(&key).is_err() {
                // The panic here is DELIBERATE. MockBackend is intended to be
                // used in tests; panics are expected. There is no error result.
                panic!("MockBackend::with_entries: invalid key {key:?}");
            }
            map.insert(key, data.into());
        }
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(map),
            journal: RwLock::new(Vec::new()),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Keys written since construction, in write order.
    pub async fn written_keys(&self) -> Vec<String> {
        self.journal.read().await.clone()
    }

    /// Raw value currently stored under `key`, if any.
    pub async fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.storage.read().await.get(key).cloned()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_destroyed() {
            exn::bail!(ErrorKind::Destroyed(self.name.clone()));
        }
        Ok(())
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let entries: [(&str, &[u8]); 0] = [];
        Self::with_entries(entries)
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.ensure_alive()?;
        let key = validate_key(key)?;
        Ok(self.storage.read().await.contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        self.ensure_alive()?;
        let key = validate_key(key)?;
        self.storage.read().await.get(key).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(key.to_string())))
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        self.ensure_alive()?;
        let key = validate_key(key)?;
        self.storage.write().await.insert(key.to_string(), data.to_vec());
        self.journal.write().await.push(key.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.ensure_alive()?;
        let key = validate_key(key)?;
        self.storage
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(key.to_string())))
    }

    async fn destroy(&self) -> Result<()> {
        self.destroyed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let backend = MockBackend::default();
        backend.write("test", b"hello").await.unwrap();
        let data = backend.read("test").await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn test_with_entries() {
        let backend = MockBackend::with_entries([("a", Vec::from(*b"1")), ("b", Vec::from(*b"2"))]);
        assert!(backend.exists("a").await.unwrap());
        assert!(backend.exists("b").await.unwrap());
        assert!(!backend.exists("c").await.unwrap());
        // Pre-populated entries are not journaled.
        assert!(backend.written_keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let backend = MockBackend::default();
        let err = backend.read("missing").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let backend = MockBackend::default();
        backend.write("file", b"data").await.unwrap();
        backend.delete("file").await.unwrap();
        assert!(!backend.exists("file").await.unwrap());
        // Delete nonexistent → NotFound
        let err = backend.delete("file").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_journal_order() {
        let backend = MockBackend::default();
        backend.write("b", b"1").await.unwrap();
        backend.write("a", b"2").await.unwrap();
        backend.write("b", b"3").await.unwrap();
        assert_eq!(backend.written_keys().await, ["b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_destroy_rejects_further_use() {
        let backend = MockBackend::default();
        backend.destroy().await.unwrap();
        assert!(backend.is_destroyed());
        let err = backend.write("a", b"1").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Destroyed(_)));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let backend = MockBackend::default();
        assert!(backend.read("../etc/passwd").await.is_err());
        assert!(backend.write("../escape", b"bad").await.is_err());
    }

    #[test]
    #[should_panic(expected = "invalid key")]
    fn test_with_entries_panics_on_bad_key() {
        MockBackend::with_entries([("../escape", Vec::from(*b"bad"))]);
    }
}
