use std::time::Duration;

use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use url::Url;

/// The production search endpoint. Tests point the provider at a mock
/// server via [`DdgHtmlSearch::with_endpoint`].
pub const DDG_HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Provider unreachable or response malformed. Non-fatal: the affected
    /// query simply yields zero candidates.
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
}

/// Rank-order-preserving search backend.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns at most `limit` result URLs, best-ranked first.
    ///
    /// "No results" is an empty vector, not an error. One attempt only; no
    /// retry on failure.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError>;
}

/// Queries the DuckDuckGo HTML endpoint and scrapes the result anchors.
#[derive(Debug, Clone)]
pub struct DdgHtmlSearch {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
}

impl DdgHtmlSearch {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SearchError::Unavailable(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: DDG_HTML_ENDPOINT.to_string(),
            user_agent: user_agent.into(),
        })
    }

    /// Points the provider at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl SearchProvider for DdgHtmlSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let url = Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|err| SearchError::Unavailable(err.to_string()))?;
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| SearchError::Unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Unavailable(format!("http status {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|err| SearchError::Unavailable(err.to_string()))?;
        Ok(parse_result_links(&body, limit))
    }
}

/// Pulls result hrefs out of a DDG HTML page. `.result__a` is the result
/// title anchor; hrefs are often wrapped in a `/l/?uddg=` redirect.
fn parse_result_links(html: &str, limit: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse(".result__a") else {
        return Vec::new();
    };
    let doc = Html::parse_document(html);
    let mut urls: Vec<String> = Vec::new();
    for element in doc.select(&selector) {
        if urls.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(target) = resolve_result_href(href) {
            if !urls.contains(&target) {
                urls.push(target);
            }
        }
    }
    urls
}

fn resolve_result_href(href: &str) -> Option<String> {
    if href.starts_with("//duckduckgo.com/l/") {
        return unwrap_uddg(&format!("https:{href}"));
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        if href.contains("duckduckgo.com/l/") {
            return unwrap_uddg(href);
        }
        return Some(href.to_string());
    }
    None
}

fn unwrap_uddg(href: &str) -> Option<String> {
    let parsed = Url::parse(href).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
        .filter(|u| u.starts_with("http://") || u.starts_with("https://"))
}
