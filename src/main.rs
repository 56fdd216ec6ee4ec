// Main entry point - Dependency injection and session setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::session::DashboardSession;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_api::HttpNocApi;
use crate::infrastructure::ws_feed::WebSocketFeed;
use crate::presentation::console::{ConsoleObserver, View};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let realtime_url = config.api.realtime_url();
    tracing::info!(
        "Starting noc-dashboard against {} (realtime {})",
        config.api.base_url,
        realtime_url
    );

    // Adapters (infrastructure layer)
    let api = Arc::new(HttpNocApi::new(
        config.api.base_url.clone(),
        config.api.request_timeout(),
    )?);
    let feed = Arc::new(WebSocketFeed::new(realtime_url));

    // Session driver (application layer)
    let service = DashboardService::new(api, feed, config.session.refresh_interval());
    service.probe_health().await;

    // Renderer (presentation layer)
    let view = View::parse(&config.view.tab).unwrap_or_else(|| {
        tracing::warn!("Unknown view {:?}, showing overview", config.view.tab);
        View::Overview
    });
    let mut session = DashboardSession::new(config.session.live_window);
    session.subscribe(ConsoleObserver::new(std::io::stdout(), view));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let session = service.run(session, shutdown).await;
    tracing::info!(
        "Final window holds {} of {} samples",
        session.state().live.len(),
        session.state().live.capacity()
    );

    Ok(())
}
