use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const REALTIME_PATH: &str = "/ws/realtime";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub view: ViewSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Derived from `base_url` when unset.
    #[serde(default)]
    pub realtime_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            realtime_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn realtime_url(&self) -> String {
        self.realtime_url
            .clone()
            .unwrap_or_else(|| derive_realtime_url(&self.base_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    #[serde(default = "default_live_window")]
    pub live_window: usize,
    /// Re-poll interval for the REST snapshots. Unset or zero fetches once.
    #[serde(default)]
    pub refresh_secs: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            live_window: default_live_window(),
            refresh_secs: None,
        }
    }
}

impl SessionSettings {
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewSettings {
    #[serde(default = "default_tab")]
    pub tab: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { tab: default_tab() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_live_window() -> usize {
    crate::domain::live_buffer::LIVE_BUFFER_CAPACITY
}

fn default_tab() -> String {
    "overview".to_string()
}

/// Load `config/dashboard.*` (optional) with `NOC__SECTION__KEY` environment
/// overrides on top.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_with_environment(environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("NOC").separator("__")
}

fn load_with_environment(env: config::Environment) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `http://host:8000/` -> `ws://host:8000/ws/realtime`
pub fn derive_realtime_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}{}", ws_base, REALTIME_PATH)
}
