//! Frontier queue and politeness throttle
//!
//! This module handles:
//! - The FIFO frontier of canonical URLs awaiting a visit
//! - Suppressing duplicate entries for URLs already pending
//! - The fixed delay between consecutive requests to the origin

use crate::config::CrawlerConfig;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// FIFO queue of URLs awaiting a crawl visit
///
/// A URL is held at most once while pending; once popped it may be pushed
/// again, so callers keep their own visited bookkeeping.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<Url>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL to the back of the queue
    ///
    /// Returns false (and leaves the queue unchanged) if the URL is already pending.
    pub fn push(&mut self, url: Url) -> bool {
        if !self.pending.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the oldest pending URL
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        Some(url)
    }

    /// Returns true if the URL is waiting in the queue
    pub fn contains(&self, url: &Url) -> bool {
        self.pending.contains(url)
    }

    /// Returns the number of URLs in the frontier
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every pending URL
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }
}

/// Fixed delay applied after every request to the target origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    /// Creates a throttle with a fixed delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a throttle from the configured request delay
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(Duration::from_millis(config.request_delay_ms))
    }

    /// Returns the current delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Raises the delay to at least `minimum` (e.g. a robots.txt Crawl-delay)
    pub fn stretch_to(&mut self, minimum: Duration) {
        self.delay = self.delay.max(minimum);
    }

    /// Sleeps for the configured delay
    ///
    /// There is only ever one request in flight, so this simply holds the
    /// single line of work until the origin may be contacted again.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
