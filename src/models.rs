//! Data models for search responses, queries and reports.
//!
//! - [`SearchItem`], [`ItemPage`]: social post search responses
//! - [`ArticleHit`], [`ArticlePage`]: news article search responses
//! - [`TopicQuery`], [`TopicResult`]: one orchestrated topic run
//! - [`DayCount`], [`TopicReport`]: the aggregated per-day view

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Posts per calendar day, keyed by `YYYY-MM-DD`.
pub type DayCount = BTreeMap<String, usize>;

/// A single post returned by the item search endpoint.
///
/// Only `created_at` is interpreted; everything else the endpoint sends is
/// kept verbatim in `fields`. `created_at` is kept as raw JSON so an item
/// with a non-string timestamp still decodes and can be skipped on its own.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SearchItem {
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SearchItem {
    #[cfg(test)]
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            created_at: Some(Value::String(created_at.into())),
            fields: Map::new(),
        }
    }

    /// The `created_at` value, if the endpoint sent it as a string.
    pub fn created_at_str(&self) -> Option<&str> {
        self.created_at.as_ref().and_then(Value::as_str)
    }
}

/// Decode `results` entry by entry, dropping entries that are not items
/// instead of failing the whole page.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<SearchItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<SearchItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Malformed search item; skipping");
                None
            }
        })
        .collect())
}

/// One page of item search results.
#[derive(Debug, Deserialize)]
pub struct ItemPage {
    #[serde(deserialize_with = "lenient_items")]
    pub results: Vec<SearchItem>,
    /// Continuation token; absent on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleHit {
    pub title: String,
}

/// One page of article search results.
#[derive(Debug, Deserialize)]
pub struct ArticlePage {
    pub results: Vec<ArticleHit>,
    /// Total hits across all offsets. Without it there is no telling
    /// whether more offsets exist.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Parameters of a single topic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuery {
    pub topic: String,
    pub article_limit: usize,
    pub item_limit: usize,
    pub day_range: u32,
}

/// Posts that mention one article title.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMentions {
    pub title: String,
    pub items: Vec<SearchItem>,
}

/// Everything collected for one topic, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicResult {
    pub topic: String,
    pub topic_items: Vec<SearchItem>,
    /// In the order the article search returned the titles.
    pub articles: Vec<ArticleMentions>,
}

impl TopicResult {
    pub fn empty(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            topic_items: Vec::new(),
            articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleDays {
    pub title: String,
    pub days: DayCount,
}

/// Per-day mention counts for a topic and each of its article titles.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopicReport {
    pub topic: String,
    pub days: DayCount,
    pub articles: Vec<ArticleDays>,
}
