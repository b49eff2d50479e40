//! Topic query orchestration.
//!
//! One topic query runs sequentially: the topic itself, then the article
//! titles found for it, then one item search per title. Separate topic
//! queries share nothing and run concurrently, bounded by
//! [`Config::workers`].

use crate::config::Config;
use crate::http::Fetch;
use crate::models::{ArticleMentions, TopicQuery, TopicResult};
use crate::search::{articles, items};
use crate::utils::window_start;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::time::Instant;
use tracing::{info, instrument};

/// Run a single topic query relative to `today`.
///
/// Searches posts about the topic, then up to `article_limit` article titles,
/// then posts about each distinct title. A zero `item_limit` or `day_range`
/// returns an empty result without any request.
///
/// # Arguments
///
/// * `fetcher` - Shared by every page request of the query.
/// * `config` - Both endpoint configurations.
/// * `query` - Topic, limits and day range.
/// * `today` - Anchor of the window; the window starts `day_range - 1` days
///   earlier.
///
/// # Returns
///
/// The raw posts for the topic and for each title, titles in the order the
/// article search returned them. Failed searches contribute what they
/// collected before failing.
///
/// # Examples
///
/// ```ignore
/// let query = TopicQuery { topic: "rust".into(), article_limit: 10, item_limit: 1500, day_range: 6 };
/// let result = run_topic_query(&fetcher, &config, &query, Utc::now().date_naive()).await;
/// let report = TopicReport::from_result(&result, &config.item_search.created_at_format);
/// ```
#[instrument(level = "info", skip(fetcher, config, today), fields(topic = %query.topic))]
pub async fn run_topic_query<F: Fetch>(
    fetcher: &F,
    config: &Config,
    query: &TopicQuery,
    today: NaiveDate,
) -> TopicResult {
    if query.item_limit == 0 || query.day_range == 0 {
        info!(
            item_limit = query.item_limit,
            day_range = query.day_range,
            "Nothing to collect"
        );
        return TopicResult::empty(&query.topic);
    }

    let t0 = Instant::now();
    let since = window_start(today, query.day_range);
    let topic_items =
        items::collect_items(fetcher, &config.item_search, &query.topic, query.item_limit, since).await;

    let mut mentions = Vec::new();
    if query.article_limit > 0 {
        let titles = articles::collect_titles(
            fetcher,
            &config.article_search,
            &query.topic,
            query.article_limit,
            since,
            today,
        )
        .await;

        for title in titles.into_iter().unique() {
            let found =
                items::collect_items(fetcher, &config.item_search, &title, query.item_limit, since).await;
            mentions.push(ArticleMentions { title, items: found });
        }
    }

    info!(
        topic_items = topic_items.len(),
        articles = mentions.len(),
        elapsed_ms = t0.elapsed().as_millis(),
        "Topic query complete"
    );
    TopicResult {
        topic: query.topic.clone(),
        topic_items,
        articles: mentions,
    }
}

/// Run several independent topic queries concurrently.
///
/// Results come back in the same order as `queries`.
pub async fn run_topic_queries<F: Fetch>(
    fetcher: &F,
    config: &Config,
    queries: &[TopicQuery],
    today: NaiveDate,
) -> Vec<TopicResult> {
    stream::iter(queries)
        .map(|query| run_topic_query(fetcher, config, query, today))
        .buffered(config.workers.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::total;
    use crate::config::{ArticleSearchConfig, ItemSearchConfig};
    use crate::http::testing::ScriptedFetcher;
    use crate::models::TopicReport;
    use serde_json::json;

    fn config() -> Config {
        Config {
            article_search: ArticleSearchConfig {
                url: "http://news.test/article".to_string(),
                api_key: None,
                page_size: 10,
            },
            item_search: ItemSearchConfig {
                url: "http://search.test/search.json".to_string(),
                ..ItemSearchConfig::default()
            },
            ..Config::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn query(article_limit: usize, item_limit: usize, day_range: u32) -> TopicQuery {
        TopicQuery {
            topic: "Republic Debates".to_string(),
            article_limit,
            item_limit,
            day_range,
        }
    }

    fn item_page(created: &[&str]) -> String {
        let results: Vec<_> = created.iter().map(|c| json!({"created_at": c})).collect();
        json!({"results": results}).to_string()
    }

    fn article_page(titles: &[&str]) -> String {
        let results: Vec<_> = titles.iter().map(|t| json!({"title": t})).collect();
        json!({"results": results, "total": titles.len()}).to_string()
    }

    const MAR_14: &str = "Thu, 14 Mar 2024 08:00:00 +0000";
    const MAR_13: &str = "Wed, 13 Mar 2024 08:00:00 +0000";

    #[tokio::test]
    async fn test_zero_item_limit_is_empty() {
        let fetcher = ScriptedFetcher::ok([item_page(&[MAR_14])]);
        let result = run_topic_query(&fetcher, &config(), &query(10, 0, 3), today()).await;

        assert_eq!(result, TopicResult::empty("Republic Debates"));
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_zero_day_range_is_empty() {
        let fetcher = ScriptedFetcher::ok([item_page(&[MAR_14])]);
        let result = run_topic_query(&fetcher, &config(), &query(10, 20, 0), today()).await;

        let report = TopicReport::from_result(&result, &config().item_search.created_at_format);
        assert!(report.days.is_empty());
        assert!(report.articles.is_empty());
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_zero_article_limit_only_collects_topic() {
        let fetcher = ScriptedFetcher::ok([item_page(&[MAR_14, MAR_13])]);
        let result = run_topic_query(&fetcher, &config(), &query(0, 20, 3), today()).await;

        assert_eq!(result.topic_items.len(), 2);
        assert!(result.articles.is_empty());
        let requested = fetcher.requested();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].contains("since=2024-03-12"));
    }

    #[tokio::test]
    async fn test_searches_each_article_title() {
        let fetcher = ScriptedFetcher::ok([
            item_page(&[MAR_14]),
            article_page(&["Debate night", "Fact check", "Debate night"]),
            item_page(&[MAR_14, MAR_13, MAR_13]),
            item_page(&[]),
        ]);
        let result = run_topic_query(&fetcher, &config(), &query(10, 20, 3), today()).await;

        let titles: Vec<_> = result.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Debate night", "Fact check"]);
        assert_eq!(result.articles[0].items.len(), 3);
        assert!(result.articles[1].items.is_empty());

        let requested = fetcher.requested();
        assert_eq!(requested.len(), 4);
        assert!(requested[1].starts_with("http://news.test/article?"));
        assert!(requested[1].contains("begin_date=20240312"));
        assert!(requested[2].contains("q=Debate+night"));
        assert!(requested[3].contains("q=Fact+check"));

        let report = TopicReport::from_result(&result, &config().item_search.created_at_format);
        assert_eq!(total(&report.articles[0].days), 3);
        assert_eq!(report.articles[0].days.len(), 2);
    }

    #[tokio::test]
    async fn test_multiple_queries_keep_input_order() {
        let fetcher = ScriptedFetcher::ok([item_page(&[MAR_14]), item_page(&[MAR_14, MAR_13])]);
        let config = Config {
            workers: 1,
            ..config()
        };
        let queries = vec![
            TopicQuery {
                topic: "first".to_string(),
                ..query(0, 20, 3)
            },
            TopicQuery {
                topic: "second".to_string(),
                ..query(0, 20, 3)
            },
        ];
        let results = run_topic_queries(&fetcher, &config, &queries, today()).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].topic, "first");
        assert_eq!(results[0].topic_items.len(), 1);
        assert_eq!(results[1].topic, "second");
        assert_eq!(results[1].topic_items.len(), 2);
    }
}
