//! # Headline Buzz
//!
//! Measures how much social chatter a news topic generates, day by day.
//!
//! ## Usage
//!
//! ```sh
//! headline_buzz <topic> [article_limit] [item_limit] [day_range]
//! ```
//!
//! ## Pipeline
//!
//! 1. **Topic search**: page through the post search for the topic itself
//! 2. **Article search**: find recent news article titles about the topic
//! 3. **Title searches**: page through the post search once per title
//! 4. **Aggregation**: bucket every collected post by calendar day and print
//!    one table for the topic and one per article title
//!
//! Every search stops at the item limit, at posts older than the day range,
//! or when the endpoint runs out of pages. Failed requests end a search
//! early; they never abort the run.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod pipeline;
mod search;
mod utils;

use cli::{Cli, OutputFormat};
use config::Config;
use http::HttpFetcher;
use models::TopicReport;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Parse CLI; usage errors exit non-zero from here
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref()).inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;
    args.apply_overrides(&mut config);
    debug!(?config.article_search.url, ?config.item_search.url, "Resolved endpoints");

    let fetcher = HttpFetcher::new(&config)?;
    let query = args.query();
    info!(
        topic = %query.topic,
        article_limit = query.article_limit,
        item_limit = query.item_limit,
        day_range = query.day_range,
        "Submitting search request"
    );

    let today = Utc::now().date_naive();
    let results = pipeline::run_topic_queries(&fetcher, &config, &[query], today).await;
    info!(count = results.len(), "Received search results");

    let reports: Vec<TopicReport> = results
        .iter()
        .map(|result| TopicReport::from_result(result, &config.item_search.created_at_format))
        .collect();

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", outputs::console::render_report(report)?);
            }
        }
        OutputFormat::Json => println!("{}", outputs::json::render_reports(&reports)?),
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");

    Ok(())
}
