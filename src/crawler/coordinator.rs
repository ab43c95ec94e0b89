//! Crawler coordinator - breadth-first product discovery
//!
//! This module contains the main crawl loop, which:
//! - Loads the origin's robots.txt into the permission gate
//! - Pops canonical URLs from the FIFO frontier
//! - Fetches pages and classifies product pages by path pattern
//! - Admits same-domain, non-media, permitted links to the frontier
//! - Applies the politeness throttle after every fetch attempt

use crate::config::Config;
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::{Frontier, Throttle};
use crate::crawler::fetch_page;
use crate::robots::PermissionGate;
use crate::state::UrlState;
use crate::url::{admit_link, canonicalize, ProductMatcher};
use crate::{ConfigError, UrlError};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Counters for one crawl session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched successfully
    pub pages_visited: usize,
    /// Pages whose fetch failed
    pub pages_failed: usize,
    /// URLs denied by robots.txt
    pub urls_rejected: usize,
    /// Links admitted to the frontier
    pub links_queued: usize,
    /// Visited pages classified as product pages
    pub products_found: usize,
    /// Whether a robots.txt ruleset was loaded for the session
    pub robots_loaded: bool,
}

/// Session-scoped breadth-first crawler
///
/// All per-session sets live on the instance and are cleared at the start
/// of every [`Crawler::crawl`] call, so one crawler can run several sessions
/// back to back.
pub struct Crawler {
    client: Client,
    user_agent: String,
    max_pages: usize,
    matcher: ProductMatcher,
    base_throttle: Throttle,
    honor_crawl_delay: bool,

    gate: PermissionGate,
    throttle: Throttle,
    frontier: Frontier,
    visited: HashSet<Url>,
    rejected: HashSet<Url>,
    failed: HashSet<Url>,
    product_urls: Vec<Url>,
    stats: CrawlStats,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to fetch with
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ConfigError)` - A product pattern failed to compile
    pub fn new(client: Client, config: &Config) -> Result<Self, ConfigError> {
        let matcher = ProductMatcher::new(&config.crawler.product_patterns)
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;
        let base_throttle = Throttle::from_config(&config.crawler);

        Ok(Self {
            client,
            user_agent: config.user_agent.crawler_name.clone(),
            max_pages: config.crawler.max_pages,
            matcher,
            base_throttle,
            honor_crawl_delay: config.crawler.honor_crawl_delay,
            gate: PermissionGate::allow_all(),
            throttle: base_throttle,
            frontier: Frontier::new(),
            visited: HashSet::new(),
            rejected: HashSet::new(),
            failed: HashSet::new(),
            product_urls: Vec::new(),
            stats: CrawlStats::default(),
        })
    }

    /// Crawls the site below `root` and returns its product URLs
    ///
    /// Product URLs are returned in discovery (breadth-first) order. The
    /// crawl stops when the frontier is empty or `max-pages` pages have been
    /// visited. Per-page failures are logged and never abort the crawl.
    ///
    /// # Errors
    ///
    /// Fails only if `root` is not an HTTP(S) URL with a host, before any
    /// request is made.
    pub async fn crawl(&mut self, root: &Url) -> Result<Vec<Url>, UrlError> {
        let root = canonicalize(root.clone())?;
        self.reset();

        self.gate = PermissionGate::load(&self.client, &root).await;
        self.stats.robots_loaded = self.gate.is_loaded();
        self.apply_crawl_delay();

        tracing::info!("Starting crawl from {}", root);
        let start_time = Instant::now();
        self.frontier.push(root.clone());

        while self.visited.len() < self.max_pages {
            let Some(url) = self.frontier.pop() else {
                tracing::info!("Frontier is empty");
                break;
            };

            if self.visited.contains(&url) || self.failed.contains(&url) {
                continue;
            }

            if !self.gate.can_fetch(&url, &self.user_agent) {
                self.reject(url);
                continue;
            }

            let visited_before = self.visited.len();
            self.visit(&url, &root).await;
            self.throttle.wait().await;

            let visited = self.visited.len();
            if visited > visited_before && visited % 10 == 0 {
                let rate = visited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {} products, {:.2} pages/sec",
                    visited,
                    self.frontier.len(),
                    self.product_urls.len(),
                    rate
                );
            }
        }

        if self.visited.len() >= self.max_pages {
            tracing::info!("Reached page budget of {}", self.max_pages);
        }

        tracing::info!(
            "Crawl complete. Found {} products in {} pages ({:?})",
            self.product_urls.len(),
            self.visited.len(),
            start_time.elapsed()
        );

        Ok(self.product_urls.clone())
    }

    /// Returns where a canonical URL stands in the current session
    pub fn state_of(&self, url: &Url) -> UrlState {
        if self.visited.contains(url) {
            UrlState::Visited
        } else if self.frontier.contains(url) {
            UrlState::Queued
        } else if self.rejected.contains(url) {
            UrlState::Rejected
        } else if self.failed.contains(url) {
            UrlState::Failed
        } else {
            UrlState::Unseen
        }
    }

    /// URLs fetched successfully in the current session
    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    /// Product URLs found in the current session, in discovery order
    pub fn product_urls(&self) -> &[Url] {
        &self.product_urls
    }

    /// Counters for the current session
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// The permission gate loaded for the current session
    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// The effective throttle for the current session
    pub fn throttle(&self) -> Throttle {
        self.throttle
    }

    /// The HTTP client shared with the harvest phase
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Clears all per-session state
    fn reset(&mut self) {
        self.gate = PermissionGate::allow_all();
        self.throttle = self.base_throttle;
        self.frontier.clear();
        self.visited.clear();
        self.rejected.clear();
        self.failed.clear();
        self.product_urls.clear();
        self.stats = CrawlStats::default();
    }

    fn apply_crawl_delay(&mut self) {
        if !self.honor_crawl_delay {
            return;
        }

        if let Some(delay) = self.gate.crawl_delay(&self.user_agent) {
            self.throttle.stretch_to(delay);
            tracing::info!(
                "robots.txt asks for a crawl delay of {:?}; using {:?} between requests",
                delay,
                self.throttle.delay()
            );
        }
    }

    /// Fetches one page, classifies it and queues its links
    async fn visit(&mut self, url: &Url, root: &Url) {
        tracing::info!("Crawling: {}", url);

        let page = match fetch_page(&self.client, url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error crawling {}: {}", url, e);
                self.failed.insert(url.clone());
                self.stats.pages_failed += 1;
                return;
            }
        };

        self.visited.insert(url.clone());
        self.stats.pages_visited += 1;

        if self.matcher.is_product_url(url) {
            tracing::info!("Found product: {}", url);
            self.product_urls.push(url.clone());
            self.stats.products_found += 1;
        }

        let parsed = parse_html(&page.body);
        tracing::debug!(
            "Fetched {} ({}, {}): {:?}, {} links",
            url,
            page.status_code,
            page.content_type.as_deref().unwrap_or("no content type"),
            parsed.title.as_deref().unwrap_or(""),
            parsed.links.len()
        );

        for raw in &parsed.links {
            self.admit(raw, &page.final_url, root);
        }
    }

    /// Queues a discovered link if it passes every admission check
    fn admit(&mut self, raw: &str, page_url: &Url, root: &Url) {
        let url = match admit_link(raw, page_url, root) {
            Ok(url) => url,
            Err(reason) => {
                tracing::trace!("Skipping link {}: {:?}", raw, reason);
                return;
            }
        };

        if !self.state_of(&url).is_admissible() {
            return;
        }

        if !self.gate.can_fetch(&url, &self.user_agent) {
            self.reject(url);
            return;
        }

        tracing::debug!("Queued {}", url);
        if self.frontier.push(url) {
            self.stats.links_queued += 1;
        }
    }

    fn reject(&mut self, url: Url) {
        tracing::debug!("URL {} disallowed by robots.txt", url);
        if self.rejected.insert(url) {
            self.stats.urls_rejected += 1;
        }
    }
}
