//! Runtime configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! wants to change:
//!
//! ```yaml
//! article_search:
//!   url: https://api.nytimes.com/svc/search/v1/article
//!   api_key: YOUR_KEY
//! item_search:
//!   url: https://search.example.com/search.json
//!   page_size: 50
//! workers: 4
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, instrument};

/// Timestamp layout of `created_at`, e.g. `Tue, 04 Dec 2012 18:02:06 +0000`.
pub const DEFAULT_CREATED_AT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub article_search: ArticleSearchConfig,
    pub item_search: ItemSearchConfig,
    /// Maximum number of topic queries in flight at once.
    pub workers: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            article_search: ArticleSearchConfig::default(),
            item_search: ItemSearchConfig::default(),
            workers: 10,
            request_timeout_secs: 30,
            user_agent: format!("headline_buzz/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// News article search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ArticleSearchConfig {
    pub url: String,
    pub api_key: Option<String>,
    /// Results the endpoint returns per offset step.
    pub page_size: usize,
}

impl Default for ArticleSearchConfig {
    fn default() -> Self {
        Self {
            url: "https://api.nytimes.com/svc/search/v1/article".to_string(),
            api_key: None,
            page_size: 10,
        }
    }
}

/// Social post search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ItemSearchConfig {
    pub url: String,
    pub page_size: usize,
    /// chrono format string used to parse each item's `created_at`.
    pub created_at_format: String,
}

impl Default for ItemSearchConfig {
    fn default() -> Self {
        Self {
            url: "https://search.twitter.com/search.json".to_string(),
            page_size: 100,
            created_at_format: DEFAULT_CREATED_AT_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, or fall back to defaults when no
    /// path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.workers, 10);
        assert_eq!(config.article_search.page_size, 10);
        assert_eq!(config.item_search.page_size, 100);
        assert_eq!(config.item_search.created_at_format, DEFAULT_CREATED_AT_FORMAT);
        assert!(config.article_search.api_key.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
item_search:
  url: http://localhost:8080/search.json
  page_size: 20
workers: 2
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.item_search.url, "http://localhost:8080/search.json");
        assert_eq!(config.item_search.page_size, 20);
        assert_eq!(config.item_search.created_at_format, DEFAULT_CREATED_AT_FORMAT);
        assert_eq!(config.workers, 2);
        assert_eq!(config.article_search, ArticleSearchConfig::default());
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Config::load(Some("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_bad_yaml_fails() {
        let path = std::env::temp_dir().join(format!("headline_buzz_bad_{}.yaml", std::process::id()));
        fs::write(&path, "workers: [not, a, number]").unwrap();
        let err = Config::load(path.to_str()).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
