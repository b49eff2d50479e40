//! Command-line interface definitions.
//!
//! Up to four positional arguments describe the query; everything else is an
//! option. Endpoint URLs and the API key can also come from the environment
//! or from the config file.

use crate::config::Config;
use crate::models::TopicQuery;
use clap::{Parser, ValueEnum};

/// Output format of the per-day report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Track how much social chatter a news topic and its headlines generate.
///
/// # Examples
///
/// ```sh
/// # Defaults: 10 articles, 1500 posts per search, 6 days
/// headline_buzz "Republic Debates"
///
/// # 5 articles, 200 posts per search, last 3 days
/// headline_buzz "Republic Debates" 5 200 3
///
/// # Against a self-hosted search endpoint
/// headline_buzz rust --item-search-url http://localhost:8080/search.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic to search news and posts for
    pub topic: String,

    /// Number of article titles to follow up on (0 disables the article search)
    #[arg(default_value_t = 10)]
    pub article_limit: usize,

    /// Maximum number of posts collected per search
    #[arg(default_value_t = 1500)]
    pub item_limit: usize,

    /// Number of days to look back, today included (at most 6)
    #[arg(default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=6))]
    pub day_range: u32,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// New York Times API key
    #[arg(long, env = "NYT_API_KEY")]
    pub nyt_api_key: Option<String>,

    /// Article search endpoint
    #[arg(long, env = "ARTICLE_SEARCH_URL")]
    pub article_search_url: Option<String>,

    /// Post search endpoint
    #[arg(long, env = "ITEM_SEARCH_URL")]
    pub item_search_url: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn query(&self) -> TopicQuery {
        TopicQuery {
            topic: self.topic.clone(),
            article_limit: self.article_limit,
            item_limit: self.item_limit,
            day_range: self.day_range,
        }
    }

    /// Apply command-line and environment overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(key) = &self.nyt_api_key {
            config.article_search.api_key = Some(key.clone());
        }
        if let Some(url) = &self.article_search_url {
            config.article_search.url = url.clone();
        }
        if let Some(url) = &self.item_search_url {
            config.item_search.url = url.clone();
        }
    }
}
