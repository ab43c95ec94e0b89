//! Crawler module for product page discovery
//!
//! This module contains the discovery phase, including:
//! - HTTP fetching with an identifying user agent
//! - HTML parsing and link extraction
//! - The FIFO frontier and politeness throttle
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlStats, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use parser::{extract_links, parse_html, ParsedPage};
pub use scheduler::{Frontier, Throttle};
