//! The fetch seam between the collectors and the network.
//!
//! Collectors only ever need "GET this URL, give me the body". [`Fetch`]
//! captures exactly that so tests can script responses, and
//! [`HttpFetcher`] implements it with a shared `reqwest` client.

use crate::config::Config;
use crate::error::FetchError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Trait for fetching a URL body.
pub trait Fetch {
    /// GET `url` and return the response body.
    ///
    /// Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let request_failed = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis(), "Search endpoint returned an error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_failed)?;
        debug!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis(), "Fetched page");
        Ok(body)
    }
}
