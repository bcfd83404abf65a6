//! HTTP client for the dashboard backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::{
    DashboardApi, FetchError, HistoryPoint, MetricsResponse, ScenarioAck, SettingsAck,
    ThresholdOverrides,
};

/// Default backend address (the development server's bind address).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Backend client speaking the dashboard's JSON API over HTTP.
///
/// # Example
///
/// ```no_run
/// use wardwatch::{DashboardApi, HttpApi};
///
/// # tokio_test::block_on(async {
/// let api = HttpApi::builder().base_url("http://localhost:5000").build().unwrap();
/// let response = api.fetch_metrics().await.unwrap();
/// println!("risk: {:?}", response.risk_score);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    description: String,
}

impl HttpApi {
    /// Create a new builder for configuring the client.
    pub fn builder() -> HttpApiBuilder {
        HttpApiBuilder::default()
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments. Each segment is
    /// percent-encoded on its own, so a `/` inside a segment cannot
    /// escape into a different route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let url = self.endpoint(segments)?;
        tracing::trace!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

/// Decode a response body in two steps so a non-JSON body and a JSON body
/// of the wrong shape are reported differently.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| FetchError::Application(e.to_string()))
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn fetch_metrics(&self) -> Result<MetricsResponse, FetchError> {
        self.get_json(&["api", "metrics"]).await
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryPoint>, FetchError> {
        self.get_json(&["api", "history", "metrics"]).await
    }

    async fn trigger_scenario(&self, name: &str) -> Result<ScenarioAck, FetchError> {
        let url = self.endpoint(&["api", "scenario", name])?;
        tracing::trace!(%url, "POST");
        let response = self.client.post(url).send().await?;
        decode(response).await
    }

    async fn update_settings(
        &self,
        overrides: &ThresholdOverrides,
    ) -> Result<SettingsAck, FetchError> {
        let url = self.endpoint(&["api", "settings"])?;
        tracing::trace!(%url, "POST");
        let response = self.client.post(url).json(overrides).send().await?;
        decode(response).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpApi`].
#[derive(Debug, Default)]
pub struct HttpApiBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpApiBuilder {
    /// Set the backend base URL (default: `http://127.0.0.1:5000`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a per-request timeout. No timeout is applied unless set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpApi, FetchError> {
        let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(raw));
        }

        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(HttpApi {
            client: client.build()?,
            description: format!("http: {}", base_url),
            base_url,
        })
    }
}
