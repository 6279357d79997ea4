//! HTTP client for the portal search service.

use anyhow::Context;
use async_trait::async_trait;

use common::search_request::SearchRequest;
use common::search_response::{ResultDetail, SearchResponse};

use crate::session::SearchBackend;

pub struct SearchGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SearchGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }

    /// Endpoint comes from `SEARCH_API_URL`, with a local default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SEARCH_API_URL").unwrap_or("http://127.0.0.1:8080".to_string());
        Self::new(base_url)
    }

    pub async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Failed to reach the search service")?;
        let status = response.status();
        let response_txt = response
            .text()
            .await
            .context("Failed to read the search response")?;
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!("Search service returned {}", status);
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        tracing::debug!("Search response: len = {}", response_txt.len());
        let response: SearchResponse =
            serde_json::from_str(&response_txt).context("Failed to parse the search response")?;
        Ok(response)
    }

    pub async fn read(&self, id: &str) -> anyhow::Result<ResultDetail> {
        let url = format!("{}/read/{}", self.base_url, id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach the search service")?;
        let status = response.status();
        let response_txt = response
            .text()
            .await
            .context("Failed to read the record response")?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        let detail: ResultDetail =
            serde_json::from_str(&response_txt).context("Failed to parse the record response")?;
        Ok(detail)
    }
}

#[async_trait]
impl SearchBackend for SearchGateway {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        SearchGateway::search(self, request).await
    }
}
