//! API client for communicating with the score server

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use score_lib::{HealthResponse, PredictionResult, ReadinessResponse, StudentRecord};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// Error body returned by the server on rejected predictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API client for the score server
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// GET a JSON body regardless of status, returning the status alongside it
    pub async fn get_with_status<T: DeserializeOwned>(&self, path: &str) -> Result<(StatusCode, T)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response.json().await.context("Failed to parse response")?;
        Ok((status, body))
    }

    /// Submit a record for scoring
    pub async fn predict(&self, record: &StudentRecord) -> Result<PredictionResult> {
        let url = self.base_url.join("predict").context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(record)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            anyhow::bail!("Prediction rejected ({}): {}", status, detail);
        }

        response.json().await.context("Failed to parse response")
    }

    pub async fn health(&self) -> Result<(StatusCode, HealthResponse)> {
        self.get_with_status("healthz").await
    }

    pub async fn readiness(&self) -> Result<(StatusCode, ReadinessResponse)> {
        self.get_with_status("readyz").await
    }
}
