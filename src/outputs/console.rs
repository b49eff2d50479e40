//! Plain-text rendering of topic reports.
//!
//! ```text
//! ----------------rust----------------
//! Date:		Mentions
//! 2024-03-13		4
//! 2024-03-14		2
//! ----------------
//! Total mentions:		6
//! ```
//!
//! The topic section comes first, then one section per article title.

use crate::aggregate::total;
use crate::models::{DayCount, TopicReport};
use std::fmt::Write;

const RULE: &str = "----------------";

fn write_section(out: &mut String, heading: &str, days: &DayCount) -> std::fmt::Result {
    writeln!(out, "{RULE}{heading}{RULE}")?;
    writeln!(out, "Date:\t\tMentions")?;
    for (day, count) in days {
        writeln!(out, "{day}\t\t{count}")?;
    }
    writeln!(out, "{RULE}")?;
    writeln!(out, "Total mentions:\t\t{}", total(days))
}

pub fn render_report(report: &TopicReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_section(&mut out, &report.topic, &report.days)?;
    for article in &report.articles {
        write_section(&mut out, &article.title, &article.days)?;
    }
    Ok(out)
}
