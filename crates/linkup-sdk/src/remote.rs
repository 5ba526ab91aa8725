//! RemoteClient: HTTP client for a running LinkUp server

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::client::{Dataset, NetworkClient};
use crate::error::{LinkupError, LinkupResult};
use crate::models::{
    CentralityReport, CommunityReport, Envelope, FilterOptions, FilterResult, Health, NetworkData, NetworkFilter,
    NetworkReport, NetworkStats, NodeDetails, PathwayReport, PathwayRequest, SdkNode,
};

/// Network client that connects to a running LinkUp server.
pub struct RemoteClient {
    http_base_url: String,
    http_client: Client,
}

impl RemoteClient {
    /// Create a new RemoteClient connecting to the given HTTP base URL.
    ///
    /// # Example
    /// ```no_run
    /// # use linkup_sdk::RemoteClient;
    /// let client = RemoteClient::new("http://localhost:5000");
    /// ```
    pub fn new(http_base_url: &str) -> Self {
        Self {
            http_base_url: http_base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.http_base_url
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> LinkupResult<Url> {
        let raw = format!("{}{}", self.http_base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| LinkupError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> LinkupResult<T> {
        let url = self.url(path, query)?;
        let response = self.http_client.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> LinkupResult<T> {
        let url = self.url(path, &[])?;
        let response = self.http_client.post(url).json(body).send().await?;
        Self::unwrap_envelope(response).await
    }

    /// Fetch a non-API path (static pages); returns the status and content type
    pub async fn fetch_page(&self, path: &str) -> LinkupResult<(u16, Option<String>)> {
        let url = self.url(path, &[])?;
        let response = self.http_client.get(url).send().await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok((response.status().as_u16(), content_type))
    }

    /// Turn a `{success, data | error}` response into the payload
    async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> LinkupResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(LinkupError::Api {
                    status: status.as_u16(),
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                })
            }
        };

        match envelope.data {
            Some(data) if status.is_success() && envelope.success => Ok(data),
            _ => Err(LinkupError::Api {
                status: status.as_u16(),
                message: envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

#[async_trait]
impl NetworkClient for RemoteClient {
    async fn health(&self) -> LinkupResult<Health> {
        let url = self.url("/api/health", &[])?;
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(LinkupError::Api {
                status: status.as_u16(),
                message: format!("Health endpoint returned {}", status),
            })
        }
    }

    async fn network(&self, dataset: Dataset, filter: &NetworkFilter) -> LinkupResult<NetworkData> {
        let mut query = filter.query_pairs();
        if dataset == Dataset::Full {
            query.push(("dataset", "full"));
        }
        self.get("/api/network", &query).await
    }

    async fn network_stats(&self) -> LinkupResult<NetworkStats> {
        self.get("/api/network/stats", &[]).await
    }

    async fn filter_options(&self) -> LinkupResult<FilterOptions> {
        self.get("/api/filters", &[]).await
    }

    async fn filter_network(&self, filter: &NetworkFilter) -> LinkupResult<FilterResult> {
        self.post("/api/network/filter", filter).await
    }

    async fn search(&self, query: &str, limit: Option<usize>) -> LinkupResult<Vec<SdkNode>> {
        let limit = limit.map(|l| l.to_string());
        let mut params = vec![("q", query)];
        if let Some(limit) = limit.as_deref() {
            params.push(("limit", limit));
        }
        self.get("/api/search", &params).await
    }

    async fn node(&self, id: &str) -> LinkupResult<NodeDetails> {
        let mut url = self.url("/api/node", &[])?;
        url.path_segments_mut()
            .map_err(|_| LinkupError::InvalidUrl(self.http_base_url.clone()))?
            .push(id);
        let response = self.http_client.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn centrality(&self, limit: Option<usize>) -> LinkupResult<CentralityReport> {
        let body = match limit {
            Some(limit) => json!({ "limit": limit }),
            None => json!({}),
        };
        self.post("/api/analysis/centrality", &body).await
    }

    async fn communities(&self, method: Option<&str>) -> LinkupResult<CommunityReport> {
        let body = match method {
            Some(method) => json!({ "method": method }),
            None => json!({}),
        };
        self.post("/api/analysis/communities", &body).await
    }

    async fn pathways(&self, request: &PathwayRequest) -> LinkupResult<PathwayReport> {
        self.post("/api/analysis/pathways", request).await
    }

    async fn report(&self) -> LinkupResult<NetworkReport> {
        self.get("/api/reports/summary", &[]).await
    }

    async fn export(&self) -> LinkupResult<serde_json::Value> {
        self.get("/api/export", &[]).await
    }
}
