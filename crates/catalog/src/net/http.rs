use std::time::Duration;

use async_trait::async_trait;
use exn::ResultExt;
use reqwest::Client;
use tracing::instrument;

use super::Fetch;
use crate::error::{ErrorKind, Result};

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}
impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .or_raise(|| ErrorKind::Transport(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.or_raise(|| ErrorKind::Transport(url.to_string()))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(HttpFetcher::new("skinwatch/test", Duration::from_secs(5)).is_ok());
    }
}
