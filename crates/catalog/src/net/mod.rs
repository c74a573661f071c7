//! Outbound HTTP.
//!
//! Everything that talks to the network goes through the [`Fetch`] trait so
//! the pipeline can be driven by canned responses in tests.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;

use std::sync::Arc;

use async_trait::async_trait;
use exn::ResultExt;
use serde::de::DeserializeOwned;

use crate::error::{ErrorKind, Result};

/// Shared handle to a fetcher.
pub type FetchHandle = Arc<dyn Fetch>;

#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return the response body.
    ///
    /// A non-2xx status is an error ([`ErrorKind::Status`]).
    async fn get(&self, url: &str) -> Result<Vec<u8>>;

    /// GET `url` and return the body as text.
    async fn get_text(&self, url: &str) -> Result<String> {
        let body = self.get(url).await?;
        String::from_utf8(body).or_raise(|| ErrorKind::Decode(url.to_string()))
    }
}

/// GET `url` and decode the body as JSON.
pub async fn get_json<T: DeserializeOwned>(fetcher: &dyn Fetch, url: &str) -> Result<T> {
    let body = fetcher.get(url).await?;
    serde_json::from_slice(&body).or_raise(|| ErrorKind::Decode(url.to_string()))
}
