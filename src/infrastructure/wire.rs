// JSON wire formats of the NOC API and their mapping to domain types
use crate::application::noc_api::BackendHealth;
use crate::domain::inventory::{Alert, Device, DeviceStatus, Insight, Severity};
use crate::domain::telemetry::{MetricReading, MetricSample, NetworkMetrics, Trend};
use crate::domain::topology::{Topology, TopologyLink, TopologyNode};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ids arrive as strings or numbers depending on the producer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_string).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

fn timestamp_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match WireTimestamp::deserialize(deserializer)? {
        WireTimestamp::Millis(ms) => Ok(ms),
        WireTimestamp::Fractional(ms) => Ok(ms as i64),
        WireTimestamp::Text(text) => {
            if let Ok(ms) = text.trim().parse::<i64>() {
                return Ok(ms);
            }
            let trimmed = text.trim();
            // ISO 8601 without an offset is read as UTC.
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .map(|t| t.timestamp_millis())
                .or_else(|_| {
                    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                        .map(|t| t.and_utc().timestamp_millis())
                })
                .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", text, e)))
        }
    }
}

// ---- realtime feed ----

#[derive(Debug, Deserialize)]
struct SampleDto {
    #[serde(deserialize_with = "timestamp_millis")]
    timestamp: i64,
    #[serde(default)]
    throughput: Option<f64>,
    #[serde(default)]
    latency: Option<f64>,
    #[serde(default)]
    packet_loss: Option<f64>,
}

pub fn decode_sample(payload: &[u8]) -> Result<MetricSample, serde_json::Error> {
    let dto: SampleDto = serde_json::from_slice(payload)?;
    Ok(MetricSample::new(
        dto.timestamp,
        dto.throughput,
        dto.latency,
        dto.packet_loss,
    ))
}

// ---- /api/devices ----

#[derive(Debug, Deserialize)]
struct DevicesEnvelope {
    #[serde(default)]
    devices: Option<Vec<DeviceDto>>,
}

#[derive(Debug, Deserialize)]
struct DeviceDto {
    #[serde(default, deserialize_with = "loose_string")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ip: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    cpu_usage: Option<f64>,
    #[serde(default)]
    memory_usage: Option<f64>,
}

impl From<DeviceDto> for Device {
    fn from(dto: DeviceDto) -> Self {
        Device {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            ip: dto.ip.unwrap_or_default(),
            kind: dto.kind.unwrap_or_default(),
            status: DeviceStatus::parse(dto.status.as_deref().unwrap_or_default()),
            location: dto.location.unwrap_or_default(),
            cpu_usage: dto.cpu_usage,
            memory_usage: dto.memory_usage,
        }
    }
}

pub fn decode_devices(body: &str) -> Result<Vec<Device>, serde_json::Error> {
    let envelope: DevicesEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .devices
        .unwrap_or_default()
        .into_iter()
        .map(Device::from)
        .collect())
}

// ---- /api/alerts ----

#[derive(Debug, Deserialize)]
struct AlertsEnvelope {
    #[serde(default)]
    alerts: Option<Vec<AlertDto>>,
}

#[derive(Debug, Deserialize)]
struct AlertDto {
    #[serde(default, deserialize_with = "loose_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    timestamp: String,
    #[serde(default)]
    device: Option<String>,
}

impl From<AlertDto> for Alert {
    fn from(dto: AlertDto) -> Self {
        let severity_label = dto.severity.unwrap_or_default();
        Alert {
            id: dto.id,
            title: dto.title.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            severity: Severity::parse(&severity_label),
            severity_label,
            timestamp: dto.timestamp,
            device: dto.device,
        }
    }
}

pub fn decode_alerts(body: &str) -> Result<Vec<Alert>, serde_json::Error> {
    let envelope: AlertsEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .alerts
        .unwrap_or_default()
        .into_iter()
        .map(Alert::from)
        .collect())
}

// ---- /api/metrics ----

#[derive(Debug, Deserialize)]
struct ReadingDto {
    #[serde(default)]
    current: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    trend: Option<String>,
    #[serde(default)]
    change: Option<f64>,
}

impl From<ReadingDto> for MetricReading {
    fn from(dto: ReadingDto) -> Self {
        MetricReading::new(
            dto.current,
            dto.unit.unwrap_or_default(),
            Trend::parse(dto.trend.as_deref().unwrap_or_default()),
            dto.change,
        )
    }
}

/// Accepts `{"metrics": {key: {current, unit, trend, change}}}` and the flat
/// `{key: number}` form. Flat entries that are neither numbers nor reading
/// objects are ignored.
pub fn decode_metrics(body: &str) -> Result<NetworkMetrics, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected a metrics object, got {}",
                other
            )))
        }
    };

    let mut readings = BTreeMap::new();
    if let Some(keyed) = object.get("metrics") {
        if !keyed.is_null() {
            let keyed: BTreeMap<String, ReadingDto> = serde_json::from_value(keyed.clone())?;
            for (key, dto) in keyed {
                readings.insert(key, MetricReading::from(dto));
            }
        }
        return Ok(NetworkMetrics::new(readings));
    }

    for (key, entry) in object {
        match entry {
            Value::Number(n) => {
                if let Some(current) = n.as_f64() {
                    readings.insert(key, MetricReading::bare(current));
                }
            }
            Value::Object(_) => {
                if let Ok(dto) = serde_json::from_value::<ReadingDto>(entry) {
                    readings.insert(key, MetricReading::from(dto));
                }
            }
            _ => {}
        }
    }
    Ok(NetworkMetrics::new(readings))
}

// ---- /api/topology ----

#[derive(Debug, Deserialize)]
struct TopologyDto {
    #[serde(default)]
    nodes: Option<Vec<NodeDto>>,
    #[serde(default)]
    links: Option<Vec<LinkDto>>,
}

#[derive(Debug, Deserialize)]
struct NodeDto {
    #[serde(default, deserialize_with = "loose_string")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkDto {
    #[serde(default, deserialize_with = "loose_string")]
    source: String,
    #[serde(default, deserialize_with = "loose_string")]
    target: String,
}

pub fn decode_topology(body: &str) -> Result<Topology, serde_json::Error> {
    let dto: TopologyDto = serde_json::from_str(body)?;
    let nodes = dto
        .nodes
        .unwrap_or_default()
        .into_iter()
        .map(|n| TopologyNode {
            id: n.id,
            name: n.name.unwrap_or_default(),
            kind: n.kind.unwrap_or_default(),
            status: n.status.unwrap_or_default(),
        })
        .collect();
    let links = dto
        .links
        .unwrap_or_default()
        .into_iter()
        .map(|l| TopologyLink {
            source: l.source,
            target: l.target,
        })
        .collect();
    Ok(Topology::new(nodes, links))
}

// ---- /api/ai/insights ----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InsightsPayload {
    List(Vec<InsightDto>),
    Wrapped {
        #[serde(default)]
        insights: Option<Vec<InsightDto>>,
    },
}

#[derive(Debug, Deserialize)]
struct InsightDto {
    #[serde(default, deserialize_with = "loose_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

pub fn decode_insights(body: &str) -> Result<Vec<Insight>, serde_json::Error> {
    let dtos = match serde_json::from_str::<InsightsPayload>(body)? {
        InsightsPayload::List(list) => list,
        InsightsPayload::Wrapped { insights } => insights.unwrap_or_default(),
    };
    Ok(dtos
        .into_iter()
        .map(|i| Insight {
            id: i.id,
            title: i.title.unwrap_or_default(),
            description: i.description.unwrap_or_default(),
            confidence: i.confidence,
        })
        .collect())
}

// ---- /health ----

#[derive(Debug, Deserialize)]
struct HealthDto {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

pub fn decode_health(body: &str) -> Result<BackendHealth, serde_json::Error> {
    let dto: HealthDto = serde_json::from_str(body)?;
    Ok(BackendHealth {
        status: dto.status.unwrap_or_else(|| "unknown".to_string()),
        service: dto.service.unwrap_or_else(|| "backend".to_string()),
        version: dto.version.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_with_rfc3339_timestamp_and_missing_loss() {
        let sample = decode_sample(
            br#"{"timestamp": "2024-01-01T00:00:00Z", "throughput": 856.7, "latency": 15.6}"#,
        )
        .unwrap();
        assert_eq!(sample.time_ms, 1_704_067_200_000);
        assert_eq!(sample.throughput, Some(856.7));
        assert_eq!(sample.packet_loss, None);
    }

    #[test]
    fn test_sample_with_offsetless_iso_timestamp_is_utc() {
        let sample =
            decode_sample(br#"{"timestamp": "2024-01-01T00:00:00", "throughput": 1.0}"#).unwrap();
        assert_eq!(sample.time_ms, 1_704_067_200_000);

        let precise = decode_sample(br#"{"timestamp": "2024-01-01T00:00:00.250000"}"#).unwrap();
        assert_eq!(precise.time_ms, 1_704_067_200_250);
    }

    #[test]
    fn test_sample_with_numeric_timestamp() {
        let sample = decode_sample(br#"{"timestamp": 1700000000123, "packet_loss": 0.02}"#).unwrap();
        assert_eq!(sample.time_ms, 1_700_000_000_123);
        assert_eq!(sample.throughput, None);
        assert_eq!(sample.packet_loss, Some(0.02));
    }

    #[test]
    fn test_malformed_samples_are_errors() {
        assert!(decode_sample(b"not json").is_err());
        assert!(decode_sample(br#"{"throughput": 1.0}"#).is_err());
        assert!(decode_sample(br#"{"timestamp": "yesterday"}"#).is_err());
    }

    #[test]
    fn test_devices_envelope() {
        let body = r#"{"devices": [
            {"id": "device_1", "name": "Core Router", "ip": "192.168.1.1", "type": "router",
             "status": "up", "cpu_usage": 23.5, "memory_usage": 67.2},
            {"id": 7, "status": "degraded"}
        ]}"#;
        let devices = decode_devices(body).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].kind, "router");
        assert_eq!(devices[0].status, DeviceStatus::Up);
        assert_eq!(devices[0].location, "");
        assert_eq!(devices[1].id, "7");
        assert_eq!(devices[1].cpu_usage, None);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        assert!(decode_devices("{}").unwrap().is_empty());
        assert!(decode_devices(r#"{"devices": null}"#).unwrap().is_empty());
        assert!(decode_alerts("{}").unwrap().is_empty());
        let topology = decode_topology("{}").unwrap();
        assert!(topology.nodes.is_empty() && topology.links.is_empty());
    }

    #[test]
    fn test_alerts_keep_raw_severity_label() {
        let body = r#"{"alerts": [{"id": "alert_1", "title": "High CPU Usage",
            "severity": "warning", "device": "192.168.1.1", "timestamp": "2 minutes ago"}]}"#;
        let alerts = decode_alerts(body).unwrap();
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[0].severity_label, "warning");
        assert_eq!(alerts[0].description, "");
        assert_eq!(alerts[0].timestamp, "2 minutes ago");
    }

    #[test]
    fn test_keyed_metrics() {
        let body = r#"{"metrics": {"latency": {"current": 15.6, "unit": "ms", "trend": "down", "change": -3.2}}}"#;
        let metrics = decode_metrics(body).unwrap();
        let latency = metrics.get("latency").unwrap();
        assert_eq!(latency.current, Some(15.6));
        assert_eq!(latency.unit, "ms");
        assert_eq!(latency.trend, Trend::Down);
        assert_eq!(latency.change, Some(-3.2));
    }

    #[test]
    fn test_flat_metrics() {
        let body = r#"{"network_throughput": 856.7, "packet_loss": 0.02, "note": "x"}"#;
        let metrics = decode_metrics(body).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics.get("network_throughput").unwrap().current, Some(856.7));
    }

    #[test]
    fn test_null_metrics_is_empty() {
        assert!(decode_metrics(r#"{"metrics": null}"#).unwrap().is_empty());
        assert!(decode_metrics("[1, 2]").is_err());
    }

    #[test]
    fn test_topology_with_numeric_endpoints() {
        let body = r#"{"nodes": [{"id": 1, "status": "active"}, {"id": "2", "name": "Edge"}],
                       "links": [{"source": 1, "target": "2"}]}"#;
        let topology = decode_topology(body).unwrap();
        assert_eq!(topology.nodes[0].id, "1");
        assert_eq!(topology.links[0].source, "1");
        assert_eq!(topology.neighbours("2"), vec!["1"]);
    }

    #[test]
    fn test_insights_bare_and_wrapped() {
        let bare = r#"[{"id": "insight_1", "title": "Network Status Good",
            "description": "All systems operating normally", "confidence": 95.0}]"#;
        assert_eq!(decode_insights(bare).unwrap()[0].confidence, Some(95.0));

        let wrapped = r#"{"insights": [{"id": "i2", "title": "Link saturation"}]}"#;
        let insights = decode_insights(wrapped).unwrap();
        assert_eq!(insights[0].title, "Link saturation");
        assert_eq!(insights[0].confidence, None);
    }

    #[test]
    fn test_health() {
        let health =
            decode_health(r#"{"status": "healthy", "service": "dashboard-backend", "version": "1.0.0"}"#)
                .unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, "1.0.0");
    }
}
