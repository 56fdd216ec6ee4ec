// Text projections of the dashboard state
use crate::domain::dashboard::DashboardState;
use crate::domain::inventory::{Alert, Device, Health, Insight, Severity};
use crate::domain::live_buffer::LiveMetricsBuffer;
use crate::domain::telemetry::{ChartData, ChartKind, SeriesData, TileData, Trend};
use crate::domain::topology::Topology;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

const MISSING: &str = "--";

pub fn status_glyph(health: Health) -> &'static str {
    match health {
        Health::Healthy => "✔",
        Health::Failed => "✖",
        Health::Impaired => "⚠",
        Health::Unknown => "–",
    }
}

pub fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Steady => "–",
    }
}

pub fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "!!",
        Severity::Warning => "! ",
        Severity::Info => "i ",
    }
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// "+2.5% from last hour"; the sign is only written for increases.
pub fn change_text(change: Option<f64>) -> String {
    match change {
        Some(c) if c > 0.0 => format!("+{}% from last hour", c),
        Some(c) => format!("{}% from last hour", c),
        None => format!("{}% from last hour", MISSING),
    }
}

/// Wall-clock time of day in the local timezone.
fn clock(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn render_header(state: &DashboardState) -> String {
    let updated = state
        .last_updated
        .map(clock)
        .unwrap_or_else(|| MISSING.to_string());
    let status = if state.all_operational() {
        "✔ All Systems Operational"
    } else {
        "⚠ Degraded Devices Present"
    };
    format!(
        "AI-NOC Dashboard  ● Live Monitoring  Last updated: {}  {}\n",
        updated, status
    )
}

pub fn render_tile(tile: &TileData) -> String {
    let value = match tile.value {
        Some(v) if tile.unit.is_empty() => v.to_string(),
        Some(v) => format!("{} {}", v, tile.unit),
        None => MISSING.to_string(),
    };
    format!(
        "{:<20} {:>14} {}  {}",
        tile.title,
        value,
        trend_glyph(tile.trend),
        change_text(tile.change)
    )
}

fn render_series_summary(series: &SeriesData) -> String {
    let last = series.points.last().map(|p| p.value);
    let min = series.points.iter().map(|p| p.value).reduce(f64::min);
    let max = series.points.iter().map(|p| p.value).reduce(f64::max);
    format!(
        "{}: {} pts, last {}, min {}, max {}",
        series.name,
        series.points.len(),
        number(last),
        number(min),
        number(max)
    )
}

pub fn render_chart(chart: &ChartData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    if chart.series.iter().all(|s| s.points.is_empty()) {
        let _ = writeln!(out, "  waiting for realtime data");
        return out;
    }
    for (i, series) in chart.series.iter().enumerate() {
        let axis = match (&chart.kind, i) {
            (ChartKind::Line, _) => "",
            (ChartKind::DualAxis, 0) => " [left axis]",
            (ChartKind::DualAxis, _) => " [right axis]",
        };
        let _ = writeln!(out, "  {}{}", render_series_summary(series), axis);
    }
    out
}

/// Fill level of the realtime window and the time of its newest sample.
pub fn render_live_status(live: &LiveMetricsBuffer) -> String {
    if live.is_empty() {
        return format!("Live window: 0/{} samples", live.capacity());
    }
    let at = live
        .latest()
        .and_then(|s| DateTime::from_timestamp_millis(s.time_ms))
        .map(clock)
        .unwrap_or_else(|| MISSING.to_string());
    format!(
        "Live window: {}/{} samples{}, latest at {}",
        live.len(),
        live.capacity(),
        if live.is_full() { " (full)" } else { "" },
        at
    )
}

pub fn render_device(device: &Device) -> String {
    format!(
        "{} {:<18} {} • {}  CPU: {}%  RAM: {}%  ({})",
        status_glyph(device.status.health()),
        device.name,
        device.ip,
        device.location,
        number(device.cpu_usage),
        number(device.memory_usage),
        device.status.as_str()
    )
}

pub fn render_alert(alert: &Alert) -> String {
    let mut line = format!(
        "{} [{}] {}",
        severity_marker(alert.severity),
        alert.severity_label.to_uppercase(),
        alert.title
    );
    if !alert.description.is_empty() {
        let _ = write!(line, " - {}", alert.description);
    }
    if !alert.timestamp.is_empty() {
        let _ = write!(line, " ({})", alert.timestamp);
    }
    line
}

pub fn render_overview(state: &DashboardState) -> String {
    let mut out = render_header(state);

    let headline = state.headline();
    let _ = writeln!(
        out,
        "\nThroughput: {} Mbps  Latency: {} ms  Packet Loss: {}%  Availability: {}%",
        headline.throughput, headline.latency, headline.packet_loss, headline.availability
    );

    if !state.network_metrics.is_empty() {
        out.push('\n');
        for tile in &state.metric_tiles() {
            let _ = writeln!(out, "{}", render_tile(tile));
        }
    }

    let _ = writeln!(out, "\n{}", render_live_status(&state.live));
    for chart in state.live_charts() {
        out.push_str(&render_chart(&chart));
    }

    let _ = writeln!(out, "\nNetwork Devices ({} Active)", state.devices.len());
    for device in &state.devices {
        let _ = writeln!(out, "  {}", render_device(device));
    }

    let _ = writeln!(out, "\nActive Alerts ({} Active)", state.alerts.len());
    for alert in &state.alerts {
        let _ = writeln!(out, "  {}", render_alert(alert));
    }

    out
}

pub fn render_topology(topology: &Topology) -> String {
    let mut out = format!(
        "Network Topology ({} nodes, {} links)\n",
        topology.nodes.len(),
        topology.links.len()
    );
    for node in &topology.nodes {
        let colour = if node.is_active() { "up" } else { "down" };
        let neighbours: Vec<&str> = topology
            .neighbours(&node.id)
            .into_iter()
            .map(|id| topology.node(id).map(|n| n.label()).unwrap_or(id))
            .collect();
        let _ = writeln!(
            out,
            "  {:<18} [{}] -> {}",
            node.label(),
            colour,
            if neighbours.is_empty() {
                MISSING.to_string()
            } else {
                neighbours.join(", ")
            }
        );
    }
    let dangling = topology.dangling_links().len();
    if dangling > 0 {
        let _ = writeln!(out, "  ({} links reference unknown nodes)", dangling);
    }
    out
}

pub fn render_insights(insights: &[Insight]) -> String {
    let mut out = String::from("AI Insights\n");
    for insight in insights {
        let _ = writeln!(out, "  {}", insight.title);
        if !insight.description.is_empty() {
            let _ = writeln!(out, "    {}", insight.description);
        }
        let _ = writeln!(out, "    Confidence: {}%", number(insight.confidence));
    }
    out
}

/// The compact alert list of the mobile screen.
pub fn render_alert_list(alerts: &[Alert]) -> String {
    let mut out = String::new();
    for alert in alerts {
        let _ = writeln!(out, "{}\n  {}\n  {}", alert.title, alert.description, alert.timestamp);
    }
    out
}
