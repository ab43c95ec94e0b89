//! Robots.txt handling module
//!
//! This module provides the crawl permission gate: the parsed robots.txt of
//! the crawl origin, loaded once per session and consulted for every URL
//! before it is queued or fetched.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::{fetch_page, FetchError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Upper bound applied to any Crawl-delay a site asks for
pub const MAX_CRAWL_DELAY: Duration = Duration::from_secs(60);

/// Per-session crawl permission gate for one origin
///
/// A gate without a loaded ruleset allows every URL. Loading never fails:
/// any problem fetching robots.txt leaves the gate in allow-all mode.
#[derive(Debug, Clone, Default)]
pub struct PermissionGate {
    robots: Option<ParsedRobots>,
}

impl PermissionGate {
    /// Creates a gate that allows every URL
    pub fn allow_all() -> Self {
        Self { robots: None }
    }

    /// Creates a gate from an already parsed ruleset
    pub fn from_robots(robots: ParsedRobots) -> Self {
        Self {
            robots: Some(robots),
        }
    }

    /// Returns the robots.txt location for the origin of `url`
    ///
    /// # Examples
    ///
    /// ```
    /// use product_harvest::robots::PermissionGate;
    /// use url::Url;
    ///
    /// let origin = Url::parse("https://shop.com:8443/collections/bows").unwrap();
    /// let robots = PermissionGate::robots_url(&origin).unwrap();
    /// assert_eq!(robots.as_str(), "https://shop.com:8443/robots.txt");
    /// ```
    pub fn robots_url(url: &Url) -> Option<Url> {
        url.join("/robots.txt").ok().map(|mut robots| {
            robots.set_query(None);
            robots.set_fragment(None);
            robots
        })
    }

    /// Fetches and parses the origin's robots.txt
    ///
    /// Network errors, timeouts and non-success statuses are logged and
    /// degrade to an allow-all gate; they are never returned to the caller.
    pub async fn load(client: &Client, origin: &Url) -> Self {
        let Some(robots_url) = Self::robots_url(origin) else {
            tracing::warn!("Cannot derive robots.txt location from {}", origin);
            return Self::allow_all();
        };

        match fetch_robots(client, &robots_url).await {
            Ok(robots) => {
                tracing::info!("Loaded robots.txt from {}", robots_url);
                Self::from_robots(robots)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load robots.txt from {}: {} (allowing all URLs)",
                    robots_url,
                    e
                );
                Self::allow_all()
            }
        }
    }

    /// Returns true if a ruleset was loaded
    pub fn is_loaded(&self) -> bool {
        self.robots.is_some()
    }

    /// Checks whether `user_agent` may fetch `url`
    pub fn can_fetch(&self, url: &Url, user_agent: &str) -> bool {
        match &self.robots {
            Some(robots) => robots.is_allowed(url.as_str(), user_agent),
            None => true,
        }
    }

    /// Returns the Crawl-delay the ruleset asks of `user_agent`, if any
    ///
    /// Delays above [`MAX_CRAWL_DELAY`] are capped to it.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        let secs = self.robots.as_ref()?.crawl_delay(user_agent)?;
        Duration::try_from_secs_f64(secs.min(MAX_CRAWL_DELAY.as_secs_f64())).ok()
    }
}

/// Fetches and parses robots.txt from an explicit location
pub async fn fetch_robots(client: &Client, robots_url: &Url) -> Result<ParsedRobots, FetchError> {
    let page = fetch_page(client, robots_url).await?;
    Ok(ParsedRobots::from_content(&page.body))
}
