//! Harvest orchestration
//!
//! A harvest run has two phases: a breadth-first crawl that discovers product
//! URLs, then one fetch per product URL (in discovery order) that extracts a
//! record. Records are collected up to the configured cap and written once
//! at the end of the run.

use crate::config::{validate, Config};
use crate::crawler::{build_http_client, fetch_page, Crawler, FetchError};
use crate::extract::{extract_from_html, ProductRecord};
use crate::output::{HarvestSummary, JsonFileOutput, ProductWriter};
use crate::url::parse_canonical;
use crate::Result;
use std::path::PathBuf;
use url::Url;

/// Drives a crawl followed by product extraction
pub struct Harvester {
    crawler: Crawler,
    max_products: usize,
    writer: Box<dyn ProductWriter + Send + Sync>,
}

impl Harvester {
    /// Creates a harvester writing to the configured JSON output path
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config.crawler, &config.user_agent)?;
        let crawler = Crawler::new(client, &config)?;
        let writer = JsonFileOutput::new(&config.output.path);

        Ok(Self {
            crawler,
            max_products: config.output.max_products,
            writer: Box::new(writer),
        })
    }

    /// Replaces the output writer
    pub fn with_writer(mut self, writer: impl ProductWriter + Send + Sync + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// The underlying crawler, for inspecting the last session
    pub fn crawler(&self) -> &Crawler {
        &self.crawler
    }

    /// Runs a full harvest starting at `root`
    ///
    /// Per-page failures are logged and skipped. Only successfully extracted
    /// pages count toward the product cap. The output is written only when
    /// at least one record was collected.
    ///
    /// # Errors
    ///
    /// Fails before any request if `root` is not an absolute HTTP(S) URL,
    /// and after the harvest if the output cannot be written.
    pub async fn run(&mut self, root: &str) -> Result<HarvestSummary> {
        let root = parse_canonical(root)?;
        let mut summary = HarvestSummary::new(root.as_str());

        let product_urls = self.crawler.crawl(&root).await?;
        summary.crawl = self.crawler.stats().clone();
        summary.products_discovered = product_urls.len();

        let throttle = self.crawler.throttle();

        for url in &product_urls {
            if summary.records.len() >= self.max_products {
                tracing::info!("Reached product limit of {}", self.max_products);
                break;
            }

            tracing::info!("Scraping product: {}", url);
            summary.products_attempted += 1;

            match self.scrape_product(url).await {
                Ok(record) => {
                    tracing::debug!("Extracted {} fields from {}", record.len(), url);
                    summary.records.push(record);
                }
                Err(e) => {
                    tracing::warn!("Error scraping {}: {}", url, e);
                    summary.extraction_failures += 1;
                }
            }

            throttle.wait().await;
        }

        if summary.records.is_empty() {
            tracing::info!("No products were collected");
        } else {
            self.writer.write_products(&summary.records)?;
            summary.output_path = Some(PathBuf::from(self.writer.destination()));
        }

        summary.finish();
        Ok(summary)
    }

    /// Fetches one product page and returns its normalized record
    ///
    /// The record always carries the page's canonical URL under `url`, and
    /// every string value has its whitespace collapsed.
    pub async fn scrape_product(&self, url: &Url) -> std::result::Result<ProductRecord, FetchError> {
        let page = fetch_page(self.crawler.client(), url).await?;

        let mut record = extract_from_html(&page.body);
        record.set_url(url);
        record.collapse_whitespace();

        Ok(record)
    }
}

/// Collapses every run of whitespace to one space and trims the ends
///
/// # Example
///
/// ```
/// use product_harvest::harvest::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Compound\n\t bow  "), "Compound bow");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
