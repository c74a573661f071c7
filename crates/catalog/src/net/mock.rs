//! Canned-response fetcher for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::Fetch;
use crate::error::{ErrorKind, Result};

#[derive(Debug, Clone)]
enum Response {
    Body(Vec<u8>),
    Status(u16),
}

/// [`Fetch`] implementation answering from a fixed table of URLs.
///
/// Unknown URLs answer `404`. Every request is recorded, in order, so tests
/// can assert on what was (or was not) fetched.
///
/// # Examples
///
/// ```
/// use skinwatch_catalog::net::{Fetch, MockFetcher};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::default().with_body("https://example.test/a", "hello");
/// assert_eq!(fetcher.get("https://example.test/a").await.unwrap(), b"hello");
/// assert!(fetcher.get("https://example.test/b").await.is_err());
/// assert_eq!(fetcher.requests().len(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Response::Body(body.into()));
        self
    }

    /// Serve `value` serialized as JSON.
    ///
    /// Panics if the value cannot be serialized. Test setup that is wrong
    /// should not pass.
    pub fn with_json(self, url: impl Into<String>, value: &impl serde::Serialize) -> Self {
        let body = match serde_json::to_vec(value) {
            Ok(body) => body,
            Err(err) => panic!("MockFetcher::with_json: {err}"),
        };
        self.with_body(url, body)
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Response::Status(status));
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requests().iter().any(|requested| requested == url)
    }

    /// Number of requests whose URL starts with `prefix`.
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.requests().iter().filter(|url| url.starts_with(prefix)).count()
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(url.to_string());
        match self.responses.get(url) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::Status(status)) => exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
