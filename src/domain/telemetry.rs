// Telemetry data domain models
use std::collections::BTreeMap;

pub const DEFAULT_THROUGHPUT_MBPS: f64 = 856.7;
pub const DEFAULT_LATENCY_MS: f64 = 15.6;
pub const DEFAULT_PACKET_LOSS_PCT: f64 = 0.02;
pub const DEFAULT_AVAILABILITY_PCT: f64 = 99.97;

/// A single reading from the realtime feed.
///
/// Numeric fields are optional: the feed is allowed to omit any of them and the
/// sample is kept as received.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub time_ms: i64,
    pub throughput: Option<f64>,
    pub latency: Option<f64>,
    pub packet_loss: Option<f64>,
}

impl MetricSample {
    pub fn new(
        time_ms: i64,
        throughput: Option<f64>,
        latency: Option<f64>,
        packet_loss: Option<f64>,
    ) -> Self {
        Self {
            time_ms,
            throughput,
            latency,
            packet_loss,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Steady,
}

impl Trend {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "up" => Trend::Up,
            "down" => Trend::Down,
            _ => Trend::Steady,
        }
    }
}

/// One entry of the `/api/metrics` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub current: Option<f64>,
    pub unit: String,
    pub trend: Trend,
    pub change: Option<f64>,
}

impl MetricReading {
    pub fn new(current: Option<f64>, unit: String, trend: Trend, change: Option<f64>) -> Self {
        Self {
            current,
            unit,
            trend,
            change,
        }
    }

    pub fn bare(current: f64) -> Self {
        Self::new(Some(current), String::new(), Trend::Steady, None)
    }
}

/// Network metrics snapshot keyed by metric name, in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkMetrics {
    readings: BTreeMap<String, MetricReading>,
}

impl NetworkMetrics {
    pub fn new(readings: BTreeMap<String, MetricReading>) -> Self {
        Self { readings }
    }

    pub fn get(&self, key: &str) -> Option<&MetricReading> {
        self.readings.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricReading)> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    fn current_of(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|k| self.get(k))
            .and_then(|r| r.current)
    }
}

/// The four headline figures of the summary card.
///
/// A figure falls back to its placeholder only when the snapshot carries no
/// metric object for it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineFigures {
    pub throughput: f64,
    pub latency: f64,
    pub packet_loss: f64,
    pub availability: f64,
}

impl HeadlineFigures {
    pub fn resolve(metrics: &NetworkMetrics) -> Self {
        Self {
            throughput: metrics
                .current_of(&["network_throughput", "throughput"])
                .unwrap_or(DEFAULT_THROUGHPUT_MBPS),
            latency: metrics
                .current_of(&["latency"])
                .unwrap_or(DEFAULT_LATENCY_MS),
            packet_loss: metrics
                .current_of(&["packet_loss"])
                .unwrap_or(DEFAULT_PACKET_LOSS_PCT),
            availability: metrics
                .current_of(&["availability"])
                .unwrap_or(DEFAULT_AVAILABILITY_PCT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileData {
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub trend: Trend,
    pub change: Option<f64>,
}

impl TileData {
    pub fn new(
        title: String,
        unit: String,
        value: Option<f64>,
        trend: Trend,
        change: Option<f64>,
    ) -> Self {
        Self {
            title,
            unit,
            value,
            trend,
            change,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeriesData {
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(name: String, points: Vec<TimeSeriesPoint>) -> Self {
        Self { name, points }
    }
}

#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line,
    /// Two series plotted against separate left/right axes.
    DualAxis,
}

impl ChartData {
    pub fn new(title: String, kind: ChartKind, series: Vec<SeriesData>) -> Self {
        Self {
            title,
            kind,
            series,
        }
    }
}

/// Project one numeric field of the live samples into a chart series.
/// Samples that lack the field leave a gap instead of a zero.
pub fn project_series<F>(samples: &[MetricSample], field: F) -> Vec<TimeSeriesPoint>
where
    F: Fn(&MetricSample) -> Option<f64>,
{
    samples
        .iter()
        .filter_map(|s| field(s).map(|v| TimeSeriesPoint::new(s.time_ms, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_defaults_when_snapshot_empty() {
        let figures = HeadlineFigures::resolve(&NetworkMetrics::default());
        assert_eq!(figures.throughput, 856.7);
        assert_eq!(figures.latency, 15.6);
        assert_eq!(figures.packet_loss, 0.02);
        assert_eq!(figures.availability, 99.97);
    }

    #[test]
    fn test_headline_uses_present_metrics_only() {
        let mut readings = BTreeMap::new();
        readings.insert("network_throughput".to_string(), MetricReading::bare(912.0));
        readings.insert("latency".to_string(), MetricReading::bare(0.0));
        let figures = HeadlineFigures::resolve(&NetworkMetrics::new(readings));

        assert_eq!(figures.throughput, 912.0);
        // zero is a real reading, not a missing one
        assert_eq!(figures.latency, 0.0);
        assert_eq!(figures.packet_loss, DEFAULT_PACKET_LOSS_PCT);
    }

    #[test]
    fn test_project_series_skips_missing_fields() {
        let samples = vec![
            MetricSample::new(1, Some(10.0), None, None),
            MetricSample::new(2, None, Some(3.0), None),
            MetricSample::new(3, Some(12.5), Some(4.0), None),
        ];
        let points = project_series(&samples, |s| s.throughput);
        assert_eq!(
            points,
            vec![TimeSeriesPoint::new(1, 10.0), TimeSeriesPoint::new(3, 12.5)]
        );
    }

    #[test]
    fn test_trend_parse() {
        assert_eq!(Trend::parse("up"), Trend::Up);
        assert_eq!(Trend::parse("down"), Trend::Down);
        assert_eq!(Trend::parse("stable"), Trend::Steady);
    }
}
