// NOC REST API client
use crate::application::noc_api::{BackendHealth, NocApi};
use crate::domain::inventory::{Alert, Device, Insight};
use crate::domain::telemetry::NetworkMetrics;
use crate::domain::topology::Topology;
use crate::infrastructure::error::ApiError;
use crate::infrastructure::wire;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const DEVICES_PATH: &str = "/api/devices";
pub const ALERTS_PATH: &str = "/api/alerts";
pub const METRICS_PATH: &str = "/api/metrics";
pub const TOPOLOGY_PATH: &str = "/api/topology";
pub const INSIGHTS_PATH: &str = "/api/ai/insights";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone)]
pub struct HttpNocApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNocApi {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the body with `decode`.
    async fn get_json<T, F>(&self, path: &str, decode: F) -> Result<T, ApiError>
    where
        F: FnOnce(&str) -> Result<T, serde_json::Error>,
    {
        let url = self.endpoint_url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status,
                body,
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Request {
            endpoint: path.to_string(),
            source,
        })?;

        decode(&body).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl NocApi for HttpNocApi {
    async fn fetch_devices(&self) -> Result<Vec<Device>> {
        let devices = self.get_json(DEVICES_PATH, wire::decode_devices).await?;
        tracing::debug!("Fetched {} devices", devices.len());
        Ok(devices)
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        let alerts = self.get_json(ALERTS_PATH, wire::decode_alerts).await?;
        tracing::debug!("Fetched {} alerts", alerts.len());
        Ok(alerts)
    }

    async fn fetch_metrics(&self) -> Result<NetworkMetrics> {
        let metrics = self.get_json(METRICS_PATH, wire::decode_metrics).await?;
        tracing::debug!("Fetched {} network metrics", metrics.len());
        Ok(metrics)
    }

    async fn fetch_topology(&self) -> Result<Topology> {
        let topology = self.get_json(TOPOLOGY_PATH, wire::decode_topology).await?;
        tracing::debug!(
            "Fetched topology with {} nodes and {} links",
            topology.nodes.len(),
            topology.links.len()
        );
        Ok(topology)
    }

    async fn fetch_insights(&self) -> Result<Vec<Insight>> {
        Ok(self.get_json(INSIGHTS_PATH, wire::decode_insights).await?)
    }

    async fn health(&self) -> Result<BackendHealth> {
        Ok(self.get_json(HEALTH_PATH, wire::decode_health).await?)
    }
}
