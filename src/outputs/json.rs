//! JSON rendering of topic reports.

use crate::models::TopicReport;

/// Serialize reports as a pretty-printed JSON array.
pub fn render_reports(reports: &[TopicReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
