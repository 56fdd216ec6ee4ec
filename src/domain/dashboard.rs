// Dashboard domain model
use super::inventory::{Alert, Device, Health, Insight};
use super::live_buffer::LiveMetricsBuffer;
use super::telemetry::{
    project_series, ChartData, ChartKind, HeadlineFigures, NetworkMetrics, SeriesData, TileData,
};
use super::topology::Topology;
use chrono::{DateTime, Utc};

/// Everything one dashboard session displays.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub live: LiveMetricsBuffer,
    pub devices: Vec<Device>,
    pub alerts: Vec<Alert>,
    pub network_metrics: NetworkMetrics,
    pub topology: Topology,
    pub insights: Vec<Insight>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn new(live_window: usize) -> Self {
        Self {
            live: LiveMetricsBuffer::with_capacity(live_window),
            devices: Vec::new(),
            alerts: Vec::new(),
            network_metrics: NetworkMetrics::default(),
            topology: Topology::default(),
            insights: Vec::new(),
            last_updated: None,
        }
    }

    pub fn headline(&self) -> HeadlineFigures {
        HeadlineFigures::resolve(&self.network_metrics)
    }

    pub fn all_operational(&self) -> bool {
        self.devices
            .iter()
            .all(|d| d.status.health() == Health::Healthy)
    }

    pub fn metric_tiles(&self) -> Vec<TileData> {
        self.network_metrics
            .iter()
            .map(|(key, reading)| {
                TileData::new(
                    metric_title(key),
                    reading.unit.clone(),
                    reading.current,
                    reading.trend,
                    reading.change,
                )
            })
            .collect()
    }

    /// The two realtime charts: throughput, and latency against packet loss.
    pub fn live_charts(&self) -> Vec<ChartData> {
        let samples = self.live.snapshot();

        let throughput = SeriesData::new(
            "Throughput".to_string(),
            project_series(&samples, |s| s.throughput),
        );
        let latency = SeriesData::new(
            "Latency".to_string(),
            project_series(&samples, |s| s.latency),
        );
        let packet_loss = SeriesData::new(
            "Packet Loss".to_string(),
            project_series(&samples, |s| s.packet_loss),
        );

        vec![
            ChartData::new(
                "Network Throughput".to_string(),
                ChartKind::Line,
                vec![throughput],
            ),
            ChartData::new(
                "Latency & Packet Loss".to_string(),
                ChartKind::DualAxis,
                vec![latency, packet_loss],
            ),
        ]
    }
}

/// "packet_loss" -> "Packet Loss". Only the first underscore becomes a
/// space; every word is then capitalized.
pub fn metric_title(key: &str) -> String {
    key.replacen('_', " ", 1)
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
