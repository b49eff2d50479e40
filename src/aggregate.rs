//! Day-bucket aggregation of collected posts.

use crate::models::{ArticleDays, DayCount, SearchItem, TopicReport, TopicResult};
use crate::utils::{day_key, parse_timestamp};
use tracing::warn;

/// Count items per UTC calendar day.
///
/// Items whose `created_at` is missing or does not match `format` are left
/// out and logged.
pub fn count_by_day(items: &[SearchItem], format: &str) -> DayCount {
    let mut days = DayCount::new();
    for item in items {
        let Some(raw) = item.created_at_str() else {
            warn!(created_at = ?item.created_at, "Item without a string created_at; not counted");
            continue;
        };
        match parse_timestamp(raw, format) {
            Ok(ts) => *days.entry(day_key(&ts)).or_insert(0) += 1,
            Err(e) => warn!(created_at = raw, error = %e, "Unparseable created_at; not counted"),
        }
    }
    days
}

impl TopicReport {
    pub fn from_result(result: &TopicResult, format: &str) -> Self {
        Self {
            topic: result.topic.clone(),
            days: count_by_day(&result.topic_items, format),
            articles: result
                .articles
                .iter()
                .map(|article| ArticleDays {
                    title: article.title.clone(),
                    days: count_by_day(&article.items, format),
                })
                .collect(),
        }
    }
}

/// Sum of all buckets.
pub fn total(days: &DayCount) -> usize {
    days.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CREATED_AT_FORMAT;
    use crate::models::ArticleMentions;

    fn items(created: &[&str]) -> Vec<SearchItem> {
        created.iter().map(|c| SearchItem::new(*c)).collect()
    }

    #[test]
    fn test_two_days_two_keys() {
        let items = items(&[
            "Tue, 12 Mar 2024 09:00:00 +0000",
            "Tue, 12 Mar 2024 23:59:59 +0000",
            "Wed, 13 Mar 2024 00:00:00 +0000",
        ]);
        let days = count_by_day(&items, DEFAULT_CREATED_AT_FORMAT);

        assert_eq!(days.len(), 2);
        assert_eq!(days["2024-03-12"], 2);
        assert_eq!(days["2024-03-13"], 1);
        assert_eq!(total(&days), items.len());
    }

    #[test]
    fn test_unparseable_items_are_excluded() {
        let mut items = items(&["Tue, 12 Mar 2024 09:00:00 +0000", "12/03/2024"]);
        items.push(SearchItem::default());
        let days = count_by_day(&items, DEFAULT_CREATED_AT_FORMAT);

        assert_eq!(days.len(), 1);
        assert_eq!(total(&days), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(count_by_day(&[], DEFAULT_CREATED_AT_FORMAT).is_empty());
    }

    #[test]
    fn test_report_from_result() {
        let result = TopicResult {
            topic: "rust".to_string(),
            topic_items: items(&["Tue, 12 Mar 2024 09:00:00 +0000"]),
            articles: vec![
                ArticleMentions {
                    title: "Second".to_string(),
                    items: items(&["Wed, 13 Mar 2024 10:00:00 +0000", "Wed, 13 Mar 2024 11:00:00 +0000"]),
                },
                ArticleMentions {
                    title: "First".to_string(),
                    items: vec![],
                },
            ],
        };
        let report = TopicReport::from_result(&result, DEFAULT_CREATED_AT_FORMAT);

        assert_eq!(report.topic, "rust");
        assert_eq!(total(&report.days), 1);
        assert_eq!(report.articles[0].title, "Second");
        assert_eq!(report.articles[0].days["2024-03-13"], 2);
        assert!(report.articles[1].days.is_empty());
    }
}
