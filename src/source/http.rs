//! HTTP fetcher backed by a blocking [`reqwest`] client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use super::Fetch;
use crate::error::FetchError;

/// Fetches feeds over HTTP(S).
///
/// The underlying client is thread-safe and keeps a connection pool, so one
/// `HttpFetcher` should be shared by every worker of a batch.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose every request gives up after `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError> {
        let url = Url::parse(source).map_err(|e| FetchError::InvalidUrl(format!("{source}: {e}")))?;

        debug!(url = %url, "fetching feed");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: source.to_string(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
