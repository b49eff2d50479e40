//! Paged social post search.
//!
//! Walks the item search endpoint page by page, newest posts first, and
//! stops at whichever comes first:
//!
//! 1. the item limit is reached;
//! 2. a post older than the window start shows up (it and everything after
//!    it on that page are dropped);
//! 3. the endpoint stops handing out a `next_page` token.
//!
//! A failed fetch or an unexpected body ends the walk as well; whatever was
//! collected up to that point is returned.

use crate::config::ItemSearchConfig;
use crate::error::PageError;
use crate::http::Fetch;
use crate::models::{ItemPage, SearchItem};
use crate::utils::{cutoff_instant, parse_timestamp, truncate_for_log};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Build the URL for the first page of a query.
pub fn first_page_url(config: &ItemSearchConfig, query: &str, since: NaiveDate) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.url)?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("rpp", &config.page_size.to_string())
        .append_pair("since", &since.format("%Y-%m-%d").to_string());
    Ok(url)
}

/// Resolve a continuation token into the URL of the next page.
///
/// Tokens that look like a query string (`?page=2&max_id=…`) replace the
/// query of the search URL. Anything else is passed back as a `next_page`
/// parameter on the first-page URL.
pub fn next_page_url(config: &ItemSearchConfig, first_page: &Url, token: &str) -> Result<Url, url::ParseError> {
    if token.starts_with('?') {
        return Url::parse(&config.url)?.join(token);
    }
    let mut url = first_page.clone();
    url.query_pairs_mut().append_pair("next_page", token);
    Ok(url)
}

async fn fetch_page<F: Fetch>(fetcher: &F, url: &Url) -> Result<ItemPage, PageError> {
    let body = fetcher.fetch(url.as_str()).await?;
    serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, body = %truncate_for_log(&body, 200), "Unexpected item page shape");
        PageError::from(e)
    })
}

/// Collect up to `limit` posts matching `query` created on or after `since`.
///
/// Never fails: fetch and decode errors are logged and end pagination.
/// Posts whose `created_at` is absent, not a string, or not in
/// `config.created_at_format` are skipped without ending the page.
///
/// # Arguments
///
/// * `fetcher` - Source of raw page bodies.
/// * `config` - Endpoint URL, page size and timestamp format.
/// * `query` - Search text, sent as `q`.
/// * `limit` - Maximum number of posts to return. `0` makes no request.
/// * `since` - First day of the window; older posts end the walk.
///
/// # Returns
///
/// The posts in endpoint order, at most `limit` of them.
///
/// # Examples
///
/// ```ignore
/// let since = window_start(today, 6);
/// let items = collect_items(&fetcher, &config.item_search, "rust", 1500, since).await;
/// assert!(items.len() <= 1500);
/// ```
#[instrument(level = "info", skip(fetcher, config))]
pub async fn collect_items<F: Fetch>(
    fetcher: &F,
    config: &ItemSearchConfig,
    query: &str,
    limit: usize,
    since: NaiveDate,
) -> Vec<SearchItem> {
    let mut items = Vec::new();
    if limit == 0 {
        return items;
    }

    let first_page = match first_page_url(config, query, since) {
        Ok(url) => url,
        Err(e) => {
            error!(url = %config.url, error = %e, "Invalid item search URL");
            return items;
        }
    };
    let cutoff = cutoff_instant(since);
    let mut seen_tokens = HashSet::new();
    let mut url = first_page.clone();
    let mut pages = 0usize;

    loop {
        let page = match fetch_page(fetcher, &url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(%url, error = %e, "Item search failed; keeping partial results");
                break;
            }
        };
        pages += 1;
        debug!(page = pages, results = page.results.len(), "Fetched item page");

        if page.results.is_empty() {
            break;
        }

        let mut reached_end = false;
        for item in page.results {
            let Some(raw) = item.created_at_str() else {
                warn!(created_at = ?item.created_at, "Item without a string created_at; skipping");
                continue;
            };
            match parse_timestamp(raw, &config.created_at_format) {
                Ok(created) if created < cutoff => {
                    debug!(created_at = raw, "Reached items older than the window");
                    reached_end = true;
                    break;
                }
                Ok(_) => items.push(item),
                Err(e) => warn!(created_at = raw, error = %e, "Unparseable created_at; skipping item"),
            }
            if items.len() >= limit {
                reached_end = true;
                break;
            }
        }
        if reached_end {
            break;
        }

        let Some(token) = page.next_page.filter(|t| !t.is_empty()) else {
            break;
        };
        if !seen_tokens.insert(token.clone()) {
            warn!(%token, "Continuation token repeated; stopping to avoid double counting");
            break;
        }
        url = match next_page_url(config, &first_page, &token) {
            Ok(next) => next,
            Err(e) => {
                warn!(%token, error = %e, "Unusable continuation token");
                break;
            }
        };
    }

    info!(count = items.len(), pages, "Collected items");
    items
}
