// Trait for the NOC REST API snapshots
use crate::domain::inventory::{Alert, Device, Insight};
use crate::domain::telemetry::NetworkMetrics;
use crate::domain::topology::Topology;
use async_trait::async_trait;

/// Backend health as reported by `/health`
#[derive(Debug, Clone, PartialEq)]
pub struct BackendHealth {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[async_trait]
pub trait NocApi: Send + Sync {
    /// Device inventory with current status and load
    async fn fetch_devices(&self) -> anyhow::Result<Vec<Device>>;

    /// Currently active alerts
    async fn fetch_alerts(&self) -> anyhow::Result<Vec<Alert>>;

    /// Aggregated network metrics keyed by metric name
    async fn fetch_metrics(&self) -> anyhow::Result<NetworkMetrics>;

    /// Nodes and links of the network graph
    async fn fetch_topology(&self) -> anyhow::Result<Topology>;

    /// Insights published by the analysis engine
    async fn fetch_insights(&self) -> anyhow::Result<Vec<Insight>>;

    async fn health(&self) -> anyhow::Result<BackendHealth>;
}
