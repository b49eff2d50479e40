//! Paged news article title search.
//!
//! The article search is offset-based: offset `n` returns results
//! `n * page_size .. (n + 1) * page_size`, and every page carries the total
//! hit count, which is how we know when to stop.

use crate::config::ArticleSearchConfig;
use crate::error::PageError;
use crate::http::Fetch;
use crate::models::ArticlePage;
use crate::utils::{compact_date, truncate_for_log};
use chrono::{Days, NaiveDate};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Build the URL for one offset of an article search.
pub fn article_page_url(
    config: &ArticleSearchConfig,
    topic: &str,
    offset: usize,
    begin: NaiveDate,
    end: NaiveDate,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.url)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("format", "json")
            .append_pair("query", topic)
            .append_pair("offset", &offset.to_string())
            .append_pair("begin_date", &compact_date(begin))
            .append_pair("end_date", &compact_date(end));
        if let Some(key) = &config.api_key {
            query.append_pair("api-key", key);
        }
    }
    Ok(url)
}

async fn fetch_page<F: Fetch>(fetcher: &F, url: &Url) -> Result<ArticlePage, PageError> {
    let body = fetcher.fetch(url.as_str()).await?;
    serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, body = %truncate_for_log(&body, 200), "Unexpected article page shape");
        PageError::from(e)
    })
}

/// Collect up to `limit` article titles about `topic` published between
/// `since` and tomorrow (relative to `today`).
///
/// Like the item search, failures end pagination and keep what was found.
/// A page without a `total` still contributes its titles, but is the last
/// one requested.
///
/// # Arguments
///
/// * `fetcher` - Source of raw page bodies.
/// * `config` - Endpoint URL, API key and page size.
/// * `topic` - Search text, sent as `query`.
/// * `limit` - Maximum number of titles. Offsets run from `0` to
///   `limit / page_size`.
/// * `since` - `begin_date` of the search.
/// * `today` - The day after it is the `end_date`.
///
/// # Returns
///
/// Titles in endpoint order, at most `limit` of them, duplicates included.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn collect_titles<F: Fetch>(
    fetcher: &F,
    config: &ArticleSearchConfig,
    topic: &str,
    limit: usize,
    since: NaiveDate,
    today: NaiveDate,
) -> Vec<String> {
    let mut titles = Vec::new();
    if limit == 0 || config.page_size == 0 {
        return titles;
    }
    if config.api_key.is_none() {
        warn!("No article search API key configured; the endpoint may reject requests");
    }

    let end = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let max_offset = limit / config.page_size;

    for offset in 0..=max_offset {
        let url = match article_page_url(config, topic, offset, since, end) {
            Ok(url) => url,
            Err(e) => {
                error!(url = %config.url, error = %e, "Invalid article search URL");
                break;
            }
        };
        let page = match fetch_page(fetcher, &url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(offset, error = %e, "Article search failed; keeping partial results");
                break;
            }
        };
        debug!(offset, results = page.results.len(), total = ?page.total, "Fetched article page");

        let room = limit - titles.len();
        titles.extend(page.results.into_iter().take(room).map(|hit| hit.title));
        if titles.len() >= limit {
            break;
        }

        let Some(total) = page.total else {
            warn!(offset, "Article page without total; stopping");
            break;
        };
        let seen_so_far = (config.page_size * (offset + 1)) as u64;
        if total < seen_so_far {
            break;
        }
    }

    info!(count = titles.len(), "Collected article titles");
    titles
}
