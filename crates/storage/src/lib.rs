//! Key-value cache storage.
//!
//! A [`StorageBackend`] stores opaque byte values under short keys; the
//! [`Cache`] façade layers JSON (de)serialization on top so callers deal in
//! typed values. Backends are interchangeable: local files for development,
//! an S3-compatible bucket (feature `s3`) for deployments, and an in-memory
//! map (feature `mock`) for tests.

pub mod backend;
mod cache;
pub mod error;
mod key;

pub use crate::backend::StorageBackend;
pub use crate::cache::{Batch, Cache};
pub use crate::key::validate as validate_key;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
