//! Crawl phase tests

use super::{link_page, mount_get, mount_robots, root_of, test_config};
use product_harvest::crawler::{build_http_client, Crawler};
use product_harvest::UrlState;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn crawler_for(dir: &TempDir, max_pages: usize) -> Crawler {
    let mut config = test_config(&dir.path().join("products.json"));
    config.crawler.max_pages = max_pages;
    let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
    Crawler::new(client, &config).unwrap()
}

#[tokio::test]
async fn test_products_found_in_discovery_order() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_get(&server, "/", link_page(&["/products/a", "/about", "/collections/bows"])).await;
    mount_get(&server, "/products/a", link_page(&["/"])).await;
    mount_get(&server, "/about", link_page(&[])).await;
    mount_get(
        &server,
        "/collections/bows",
        link_page(&["/collections/bows/products/b", "/products/a?variant=2"]),
    )
    .await;
    mount_get(&server, "/collections/bows/products/b", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);

    let products = crawler.crawl(&root).await.unwrap();

    assert_eq!(
        products,
        vec![
            root.join("/products/a").unwrap(),
            root.join("/collections/bows/products/b").unwrap(),
        ]
    );
    assert_eq!(crawler.visited().len(), 5);
    assert!(crawler.stats().robots_loaded);
    assert_eq!(crawler.stats().products_found, 2);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    for (route, links) in [
        ("/", vec!["/a", "/b"]),
        ("/a", vec!["/", "/b", "/a#top"]),
        ("/b", vec!["/a", "/?page=2"]),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(link_page(&links))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    crawler.crawl(&root_of(&server)).await.unwrap();

    assert_eq!(crawler.visited().len(), 3);
}

#[tokio::test]
async fn test_robots_disallow_honored() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private").await;

    mount_get(&server, "/", link_page(&["/private/deal", "/products/a"])).await;
    mount_get(&server, "/products/a", link_page(&[])).await;
    Mock::given(method("GET"))
        .and(path("/private/deal"))
        .respond_with(link_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);
    crawler.crawl(&root).await.unwrap();

    let private = root.join("/private/deal").unwrap();
    assert_eq!(crawler.state_of(&private), UrlState::Rejected);
    assert_eq!(crawler.stats().urls_rejected, 1);
    assert_eq!(crawler.product_urls().len(), 1);
}

#[tokio::test]
async fn test_robots_for_other_agent_ignored() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: OtherBot\nDisallow: /").await;
    mount_get(&server, "/", link_page(&["/products/a"])).await;
    mount_get(&server, "/products/a", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let products = crawler.crawl(&root_of(&server)).await.unwrap();

    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_missing_robots_allows_all() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/products/a"])).await;
    mount_get(&server, "/products/a", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);
    let products = crawler.crawl(&root).await.unwrap();

    assert!(!crawler.stats().robots_loaded);
    assert!(crawler.gate().can_fetch(&root.join("/anything").unwrap(), "TestBot"));
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_robots_server_error_allows_all() {
    let server = MockServer::start().await;
    mount_get(&server, "/robots.txt", ResponseTemplate::new(500)).await;
    mount_get(&server, "/", link_page(&["/products/a"])).await;
    mount_get(&server, "/products/a", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let products = crawler.crawl(&root_of(&server)).await.unwrap();

    assert!(!crawler.gate().is_loaded());
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_max_pages_bounds_visits() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    let routes: Vec<String> = (0..20).map(|i| format!("/page/{i}")).collect();
    let links: Vec<&str> = routes.iter().map(String::as_str).collect();
    mount_get(&server, "/", link_page(&links)).await;
    for route in &routes {
        mount_get(&server, route, link_page(&[])).await;
    }

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 5);
    crawler.crawl(&root_of(&server)).await.unwrap();

    assert_eq!(crawler.visited().len(), 5);
    assert_eq!(crawler.stats().pages_visited, 5);
}

#[tokio::test]
async fn test_failed_page_does_not_abort_crawl() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_get(&server, "/", link_page(&["/broken", "/products/ok"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/products/ok", link_page(&["/broken"])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);
    let products = crawler.crawl(&root).await.unwrap();

    assert_eq!(products, vec![root.join("/products/ok").unwrap()]);
    assert_eq!(crawler.state_of(&root.join("/broken").unwrap()), UrlState::Failed);
    assert_eq!(crawler.stats().pages_failed, 1);
}

#[tokio::test]
async fn test_off_domain_and_media_links_not_followed() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_get(
        &server,
        "/",
        link_page(&[
            "/cdn/products/bow.PNG",
            "https://elsewhere.invalid/products/x",
            "/products/jpg-strap",
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/cdn/products/bow.PNG"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_get(&server, "/products/jpg-strap", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);
    let products = crawler.crawl(&root).await.unwrap();

    assert_eq!(products, vec![root.join("/products/jpg-strap").unwrap()]);
}

#[tokio::test]
async fn test_crawler_reusable_across_sessions() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/products/a"])).await;
    mount_get(&server, "/products/a", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let mut crawler = crawler_for(&dir, 100);
    let root = root_of(&server);

    let first = crawler.crawl(&root).await.unwrap();
    let second = crawler.crawl(&root).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(crawler.visited().len(), 2);
    assert_eq!(crawler.stats().pages_visited, 2);
}
