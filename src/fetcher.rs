//! Single-attempt image fetching over HTTP
//!
//! Every call issues exactly one GET with the configured timeout. Non-2xx
//! statuses and transport faults are reported as [`FetchError`]; nothing is
//! retried and the response body is returned untouched.

use crate::config::FetchConfig;
use crate::error::{Error, FetchError, Result};
use std::time::Duration;
use tracing::debug;

/// HTTP client used by the bundler to download images
#[derive(Clone, Debug)]
pub struct ImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ImageFetcher {
    /// Build a fetcher from configuration
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Download the body at `url`
    ///
    /// `url` is expected to be trimmed already. An unparsable URL fails without
    /// touching the network.
    pub async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.classify(url, e)
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        debug!(url, bytes = body.len(), "fetched image");
        Ok(body.to_vec())
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}
