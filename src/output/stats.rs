//! Harvest run summary
//!
//! This module provides the summary a harvest run returns, and a console
//! rendering of it for the command-line tool.

use crate::crawler::CrawlStats;
use crate::extract::ProductRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one harvest run
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// Canonical root URL the crawl started from
    pub root_url: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Discovery phase counters
    pub crawl: CrawlStats,

    /// Product URLs discovered by the crawl
    pub products_discovered: usize,

    /// Product pages fetched during the harvest phase
    pub products_attempted: usize,

    /// Product pages that could not be fetched
    pub extraction_failures: usize,

    /// Collected records, in harvest order
    pub records: Vec<ProductRecord>,

    /// Where the records were written; `None` when nothing was written
    pub output_path: Option<PathBuf>,
}

impl HarvestSummary {
    /// Creates an empty summary for a run starting now
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            started_at: Utc::now(),
            finished_at: None,
            crawl: CrawlStats::default(),
            products_discovered: 0,
            products_attempted: 0,
            extraction_failures: 0,
            records: Vec::new(),
            output_path: None,
        }
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of records collected
    pub fn records_collected(&self) -> usize {
        self.records.len()
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Percentage of attempted product pages that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.products_attempted == 0 {
            return 0.0;
        }
        (self.records.len() as f64 / self.products_attempted as f64) * 100.0
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &HarvestSummary) {
    println!("\n=== Harvest Summary ===\n");

    println!("Run:");
    println!("  Root URL: {}", summary.root_url);
    println!("  Started: {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = summary.duration_seconds() {
        println!("  Duration: {:.1}s", duration);
    }
    println!();

    let crawl = &summary.crawl;
    println!("Crawl:");
    println!(
        "  robots.txt: {}",
        if crawl.robots_loaded { "loaded" } else { "not available (allowing all)" }
    );
    println!("  Pages visited: {}", crawl.pages_visited);
    println!("  Pages failed: {}", crawl.pages_failed);
    println!("  URLs disallowed: {}", crawl.urls_rejected);
    println!("  Links queued: {}", crawl.links_queued);
    println!("  Product pages found: {}", summary.products_discovered);
    println!();

    println!("Harvest:");
    println!("  Product pages fetched: {}", summary.products_attempted);
    println!("  Failures: {}", summary.extraction_failures);
    println!(
        "  Records collected: {} ({:.1}% success)",
        summary.records_collected(),
        summary.success_rate()
    );

    match &summary.output_path {
        Some(path) => println!("  Output: {}", path.display()),
        None => println!("  Output: none (no products were collected)"),
    }
}
