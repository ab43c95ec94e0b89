//! End-to-end harvest tests

use super::{html, link_page, mount_get, mount_robots, root_of, test_config};
use product_harvest::Harvester;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_page(name: &str, price: &str) -> ResponseTemplate {
    html(format!(
        r#"<html><head>
        <script type="application/ld+json">
            {{"@type": "Product", "name": "{name}", "offers": {{"price": "{price}"}}}}
        </script>
        </head><body><h1>{name}</h1></body></html>"#
    ))
}

fn read_output(path: &std::path::Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).expect("output file");
    serde_json::from_str(&content).expect("valid JSON array")
}

#[tokio::test]
async fn test_three_page_site_yields_one_record() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_get(&server, "/", link_page(&["/products/x", "/about"])).await;
    mount_get(&server, "/products/x", product_page("Bow", "199.99")).await;
    mount_get(&server, "/about", link_page(&["/"])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut config = test_config(&output);
    config.crawler.max_pages = 10;
    config.output.max_products = 5;

    let mut harvester = Harvester::new(config).unwrap();
    let summary = harvester.run(&server.uri()).await.unwrap();

    let expected_url = root_of(&server).join("/products/x").unwrap();
    let records = read_output(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["url"], expected_url.as_str());
    assert_eq!(records[0]["name"], "Bow");
    assert_eq!(records[0]["offers_price"], "199.99");

    assert_eq!(summary.records_collected(), 1);
    assert_eq!(summary.crawl.pages_visited, 3);
    assert_eq!(summary.output_path.as_deref(), Some(output.as_path()));
}

#[tokio::test]
async fn test_output_is_four_space_indented_utf8() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/products/arc"])).await;
    mount_get(&server, "/products/arc", product_page("Arc à poulies", "349,00")).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut harvester = Harvester::new(test_config(&output)).unwrap();
    harvester.run(&server.uri()).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("[\n    {\n        \""));
    assert!(content.contains("Arc à poulies"));
}

#[tokio::test]
async fn test_failures_do_not_count_toward_cap() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/products/a", "/products/b", "/products/c"])).await;
    mount_get(&server, "/products/a", product_page("A", "1")).await;
    mount_get(&server, "/products/c", product_page("C", "3")).await;

    // /products/b answers once for the crawl, then fails for the harvest
    Mock::given(method("GET"))
        .and(path("/products/b"))
        .respond_with(product_page("B", "2"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_get(&server, "/products/b", ResponseTemplate::new(500)).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut config = test_config(&output);
    config.output.max_products = 2;

    let mut harvester = Harvester::new(config).unwrap();
    let summary = harvester.run(&server.uri()).await.unwrap();

    let names: Vec<Value> = read_output(&output).into_iter().map(|r| r["name"].clone()).collect();
    assert_eq!(names, vec![Value::from("A"), Value::from("C")]);
    assert_eq!(summary.products_attempted, 3);
    assert_eq!(summary.extraction_failures, 1);
}

#[tokio::test]
async fn test_cap_stops_harvest() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/products/a", "/products/b", "/products/c"])).await;
    mount_get(&server, "/products/a", product_page("A", "1")).await;
    for route in ["/products/b", "/products/c"] {
        // Fetched by the crawl only
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(product_page("Other", "0"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut config = test_config(&output);
    config.output.max_products = 1;

    let mut harvester = Harvester::new(config).unwrap();
    let summary = harvester.run(&server.uri()).await.unwrap();

    assert_eq!(summary.products_discovered, 3);
    assert_eq!(summary.products_attempted, 1);
    assert_eq!(read_output(&output).len(), 1);
}

#[tokio::test]
async fn test_fallback_fields_whitespace_collapsed() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/collections/bows/products/recurve"])).await;
    mount_get(
        &server,
        "/collections/bows/products/recurve",
        html(
            r#"<html><head>
            <meta property="og:title" content="  Recurve
                Bow  ">
            </head><body>
            <span class="price">
                $249.00
            </span>
            <div class="product-description"><p>Light   and</p>
            <p>quiet</p></div>
            </body></html>"#,
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut harvester = Harvester::new(test_config(&output)).unwrap();
    harvester.run(&server.uri()).await.unwrap();

    let records = read_output(&output);
    assert_eq!(records[0]["title"], "Recurve Bow");
    assert_eq!(records[0]["price"], "$249.00");
    assert_eq!(records[0]["description"], "Light and quiet");
}

#[tokio::test]
async fn test_no_products_writes_nothing() {
    let server = MockServer::start().await;
    mount_get(&server, "/", link_page(&["/about", "/blog/post"])).await;
    mount_get(&server, "/about", link_page(&[])).await;
    mount_get(&server, "/blog/post", link_page(&[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut harvester = Harvester::new(test_config(&output)).unwrap();
    let summary = harvester.run(&server.uri()).await.unwrap();

    assert_eq!(summary.records_collected(), 0);
    assert!(summary.output_path.is_none());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unreachable_root_finishes_empty() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("products.json");
    let mut harvester = Harvester::new(test_config(&output)).unwrap();

    // Port 9 (discard) on localhost is closed in test environments
    let summary = harvester.run("http://127.0.0.1:9/").await.unwrap();

    assert_eq!(summary.crawl.pages_failed, 1);
    assert_eq!(summary.records_collected(), 0);
    assert!(!output.exists());
}
