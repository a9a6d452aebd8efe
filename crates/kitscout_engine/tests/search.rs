use std::time::Duration;

use kitscout_engine::{DdgHtmlSearch, SearchError, SearchProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn results_page() -> String {
    // The shape of the DuckDuckGo HTML endpoint: result title anchors carry
    // the `result__a` class, most hrefs wrapped in a /l/?uddg= redirect.
    r##"
    <html><body>
      <div class="result">
        <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ffn-test.com%2Fproducts%2Fnox4&amp;rut=abc">NOX4 ELISA Kit</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://fn-test.com/products/nox4-plus">NOX4 Plus</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://fn-test.com/products/nox4-plus">Duplicate</a>
      </div>
      <div class="result">
        <a class="result__a" href="javascript:void(0)">Sponsored</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://www.abcam.com/nox4-kit">Abcam NOX4</a>
      </div>
      <a href="https://duckduckgo.com/settings">settings</a>
    </body></html>
    "##
    .to_string()
}

async fn provider_for(server: &MockServer) -> DdgHtmlSearch {
    DdgHtmlSearch::new(Duration::from_secs(5), "kitscout-test/1.0")
        .expect("client")
        .with_endpoint(format!("{}/html/", server.uri()))
}

#[tokio::test]
async fn search_returns_urls_in_rank_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "site:fn-test.com NOX4 ELISA kit mouse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(results_page(), "text/html"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let urls = provider
        .search("site:fn-test.com NOX4 ELISA kit mouse", 10)
        .await
        .expect("search ok");

    assert_eq!(
        urls,
        vec![
            "https://fn-test.com/products/nox4".to_string(),
            "https://fn-test.com/products/nox4-plus".to_string(),
            "https://www.abcam.com/nox4-kit".to_string(),
        ]
    );
}

#[tokio::test]
async fn search_honors_the_result_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(results_page(), "text/html"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let urls = provider.search("NOX4", 1).await.expect("search ok");
    assert_eq!(urls, vec!["https://fn-test.com/products/nox4".to_string()]);

    let none = provider.search("NOX4", 0).await.expect("search ok");
    assert!(none.is_empty());
}

#[tokio::test]
async fn no_results_is_an_empty_list_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html><body></body></html>", "text/html"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let urls = provider.search("no such analyte", 10).await.expect("ok");
    assert!(urls.is_empty());
}

#[tokio::test]
async fn provider_http_error_is_reported_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.search("NOX4", 10).await.unwrap_err();
    assert!(matches!(err, SearchError::Unavailable(_)));
}
