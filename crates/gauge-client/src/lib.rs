//! Caller side of the batch-metrics protocol.
//!
//! Transport failures (connect errors, timeouts, 5xx) are retried a
//! bounded number of times with a growing delay. Validation rejections
//! (4xx) are returned immediately; retrying a request the service already
//! deemed invalid cannot succeed.

use gauge_core::errors::GaugeError;
use gauge_core::model::{BatchMetricsRequest, BatchMetricsResponse};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 300,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsListing {
    pub metrics_by_category: BTreeMap<String, Vec<String>>,
    pub all_metrics: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

pub struct GaugeClient {
    cfg: ClientConfig,
    http: reqwest::Client,
}

impl GaugeClient {
    pub fn new(cfg: ClientConfig) -> Result<Self, GaugeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| GaugeError::Config(format!("failed to build http client: {}", e)))?;
        Ok(Self { cfg, http })
    }

    /// The primary call: submit a batch and get ordered per-item results.
    pub async fn calculate_batch_metrics(
        &self,
        req: &BatchMetricsRequest,
    ) -> Result<BatchMetricsResponse, GaugeError> {
        let url = format!("{}/v1/metrics/batch", self.cfg.base_url);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.try_batch_call(&url, req).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() && attempt < self.cfg.max_retries => {
                    tracing::warn!(
                        attempt,
                        max_retries = self.cfg.max_retries,
                        error = %e,
                        "batch call failed, retrying"
                    );
                    let delay = self.cfg.retry_delay_ms.saturating_mul(u64::from(attempt));
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_batch_call(
        &self,
        url: &str,
        req: &BatchMetricsRequest,
    ) -> Result<BatchMetricsResponse, GaugeError> {
        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(|e| GaugeError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() {
            let body: ErrorBody = resp.json().await.unwrap_or(ErrorBody {
                error: status.to_string(),
            });
            return Err(GaugeError::invalid(body.error));
        }
        if !status.is_success() {
            return Err(GaugeError::Transport(format!(
                "server returned {}",
                status
            )));
        }
        resp.json::<BatchMetricsResponse>()
            .await
            .map_err(|e| GaugeError::Transport(format!("malformed response body: {}", e)))
    }

    pub async fn available_metrics(&self) -> Result<MetricsListing, GaugeError> {
        let url = format!("{}/v1/metrics", self.cfg.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GaugeError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(GaugeError::Transport(format!(
                "server returned {}",
                resp.status()
            )));
        }
        resp.json()
            .await
            .map_err(|e| GaugeError::Transport(format!("malformed response body: {}", e)))
    }

    /// Ok(true) when the service reports itself healthy; transport
    /// problems are errors, an unhealthy body is Ok(false).
    pub async fn health_check(&self) -> Result<bool, GaugeError> {
        let url = format!("{}/health", self.cfg.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GaugeError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GaugeError::Transport(format!("malformed response body: {}", e)))?;
        Ok(body["status"] == "healthy")
    }
}

/// One-shot convenience wrapper for callers that do not hold a client.
pub async fn calculate_metrics(
    base_url: &str,
    req: &BatchMetricsRequest,
) -> Result<BatchMetricsResponse, GaugeError> {
    GaugeClient::new(ClientConfig::new(base_url))?
        .calculate_batch_metrics(req)
        .await
}
