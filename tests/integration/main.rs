//! Integration tests for Product-Harvest
//!
//! These tests use wiremock to stand in for a small shop and run the crawl
//! and harvest phases end-to-end against it.

mod crawl_tests;
mod harvest_tests;

use product_harvest::config::Config;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
pub fn test_config(output: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.request_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config.output.path = output.display().to_string();
    config
}

/// An HTML response with the given body
pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// A page whose body is a list of links
pub fn link_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    html(format!("<html><body>{anchors}</body></html>"))
}

/// Mounts a GET route that answers with `response`
pub async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mounts a robots.txt with the given content
pub async fn mount_robots(server: &MockServer, content: &str) {
    mount_get(
        server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(content.to_string()),
    )
    .await;
}

/// Root URL of the mock server, with its trailing slash
pub fn root_of(server: &MockServer) -> url::Url {
    url::Url::parse(&server.uri())
        .and_then(|u| u.join("/"))
        .expect("mock server uri")
}
