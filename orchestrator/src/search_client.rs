use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::SearchResult;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchResult>, ApiError>;
}

/// Web search client for a Bing-style endpoint. Left unconfigured it returns
/// no results instead of failing, so the pipeline still produces a report.
pub struct WebSearchClient {
    http: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl WebSearchClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(SEARCH_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: config.bing_endpoint.clone(),
            api_key: config.bing_api_key.clone(),
        })
    }
}

#[derive(Deserialize, Default)]
struct SearchResponse {
    #[serde(rename = "webPages", default)]
    web_pages: WebPages,
}

#[derive(Deserialize, Default)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Deserialize)]
struct WebPage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    url: String,
}

#[async_trait]
impl WebSearch for WebSearchClient {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchResult>, ApiError> {
        let (Some(endpoint), Some(api_key)) = (self.endpoint.as_deref(), self.api_key.as_deref())
        else {
            return Ok(Vec::new());
        };

        let response = self
            .http
            .get(endpoint)
            .query(&[("q", query.to_string()), ("count", top.to_string())])
            .header("Ocp-Apim-Subscription-Key", api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let results: SearchResponse = response.json().await?;
        Ok(results
            .web_pages
            .value
            .into_iter()
            .take(top)
            .map(|page| SearchResult {
                title: page.name,
                snippet: page.snippet,
                url: page.url,
            })
            .collect())
    }
}
