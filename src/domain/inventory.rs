// Device, alert and insight snapshots as served by the NOC API

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceStatus {
    Up,
    Active,
    Down,
    Degraded,
    Warning,
    Unknown(String),
}

impl DeviceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "up" => DeviceStatus::Up,
            "active" => DeviceStatus::Active,
            "down" => DeviceStatus::Down,
            "degraded" => DeviceStatus::Degraded,
            "warning" => DeviceStatus::Warning,
            other => DeviceStatus::Unknown(other.to_string()),
        }
    }

    pub fn health(&self) -> Health {
        match self {
            DeviceStatus::Up | DeviceStatus::Active => Health::Healthy,
            DeviceStatus::Down => Health::Failed,
            DeviceStatus::Degraded | DeviceStatus::Warning => Health::Impaired,
            DeviceStatus::Unknown(_) => Health::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceStatus::Up => "up",
            DeviceStatus::Active => "active",
            DeviceStatus::Down => "down",
            DeviceStatus::Degraded => "degraded",
            DeviceStatus::Warning => "warning",
            DeviceStatus::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Impaired,
    Failed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub kind: String,
    pub status: DeviceStatus,
    pub location: String,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Raw severity label, shown uppercased.
    pub severity_label: String,
    pub severity: Severity,
    /// Display string, e.g. "2 minutes ago".
    pub timestamp: String,
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_status_health() {
        assert_eq!(DeviceStatus::parse("up").health(), Health::Healthy);
        assert_eq!(DeviceStatus::parse("active").health(), Health::Healthy);
        assert_eq!(DeviceStatus::parse("down").health(), Health::Failed);
        assert_eq!(DeviceStatus::parse("degraded").health(), Health::Impaired);
        assert_eq!(DeviceStatus::parse("warning").health(), Health::Impaired);

        let odd = DeviceStatus::parse("maintenance");
        assert_eq!(odd.health(), Health::Unknown);
        assert_eq!(odd.as_str(), "maintenance");
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("critical"), Severity::Critical);
        assert_eq!(Severity::parse("warning"), Severity::Warning);
        assert_eq!(Severity::parse("minor"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
    }
}
