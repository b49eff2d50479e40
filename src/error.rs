//! Error types shared by the fetch layer, the collectors and configuration.
//!
//! Only [`ConfigError`] is ever fatal. [`FetchError`] and [`PageError`] are
//! logged by the collectors and end pagination for the query at hand.

use thiserror::Error;

/// A single HTTP fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A page of search results could not be obtained.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body was not the JSON shape the endpoint promises.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Loading the YAML configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
