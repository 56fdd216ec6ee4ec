// Dashboard service - Drives a session from REST snapshots and the realtime feed
use crate::application::noc_api::NocApi;
use crate::application::realtime_feed::RealtimeFeed;
use crate::application::session::{DashboardSession, SessionEvent};
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

const EVENT_QUEUE_DEPTH: usize = 100;

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn NocApi>,
    feed: Arc<dyn RealtimeFeed>,
    refresh_interval: Option<Duration>,
}

impl DashboardService {
    pub fn new(
        api: Arc<dyn NocApi>,
        feed: Arc<dyn RealtimeFeed>,
        refresh_interval: Option<Duration>,
    ) -> Self {
        Self {
            api,
            feed,
            refresh_interval,
        }
    }

    /// Log what the backend reports about itself. Never fails the session.
    pub async fn probe_health(&self) {
        match self.api.health().await {
            Ok(health) => tracing::info!(
                "Backend {} {} is {}",
                health.service,
                health.version,
                health.status
            ),
            Err(e) => tracing::warn!("Backend health check failed: {:#}", e),
        }
    }

    /// Feed `session` until `shutdown` resolves or every producer is done,
    /// then close the realtime connection and the session.
    ///
    /// All mutation happens here, one event at a time, in arrival order.
    pub async fn run<S>(&self, mut session: DashboardSession, shutdown: S) -> DashboardSession
    where
        S: Future<Output = ()>,
    {
        let started = Instant::now();
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (stop_tx, stop_rx) = watch::channel(false);

        // 1. Snapshot fetches, all at once
        spawn_snapshot_fetches(&self.api, &tx);

        // 2. Optional periodic re-poll of the snapshots
        let refresher = self
            .refresh_interval
            .map(|period| spawn_refresher(self.api.clone(), tx.clone(), period, stop_rx.clone()));

        // 3. Realtime feed reader
        let reader = tokio::spawn(read_feed(self.feed.clone(), tx, stop_rx));

        let mut events = ReceiverStream::new(rx);
        let mut applied = 0usize;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, closing dashboard session");
                    break;
                }
                event = events.next() => match event {
                    Some(event) => {
                        if session.apply(event) {
                            applied += 1;
                        }
                    }
                    None => {
                        tracing::debug!("All dashboard producers finished");
                        break;
                    }
                }
            }
        }

        // Results still in flight are dropped with the queue.
        drop(events);
        let _ = stop_tx.send(true);
        join_quietly("realtime feed reader", reader).await;
        if let Some(refresher) = refresher {
            join_quietly("snapshot refresher", refresher).await;
        }

        session.close();
        tracing::info!(
            "Dashboard session closed after {:?} ({} events applied)",
            started.elapsed(),
            applied
        );
        session
    }
}

fn spawn_snapshot_fetches(api: &Arc<dyn NocApi>, tx: &mpsc::Sender<SessionEvent>) {
    let repo = api.clone();
    spawn_fetch("devices", tx.clone(), async move {
        repo.fetch_devices().await.map(SessionEvent::Devices)
    });

    let repo = api.clone();
    spawn_fetch("alerts", tx.clone(), async move {
        repo.fetch_alerts().await.map(SessionEvent::Alerts)
    });

    let repo = api.clone();
    spawn_fetch("metrics", tx.clone(), async move {
        repo.fetch_metrics().await.map(SessionEvent::NetworkMetrics)
    });

    let repo = api.clone();
    spawn_fetch("topology", tx.clone(), async move {
        repo.fetch_topology().await.map(SessionEvent::Topology)
    });

    let repo = api.clone();
    spawn_fetch("insights", tx.clone(), async move {
        repo.fetch_insights().await.map(SessionEvent::Insights)
    });
}

fn spawn_fetch<F>(name: &'static str, tx: mpsc::Sender<SessionEvent>, fetch: F)
where
    F: Future<Output = anyhow::Result<SessionEvent>> + Send + 'static,
{
    tokio::spawn(async move {
        match fetch.await {
            Ok(event) => {
                if tx.send(event).await.is_err() {
                    tracing::debug!("Session gone, dropping {} snapshot", name);
                }
            }
            Err(e) => {
                tracing::error!("Error fetching {}: {:#}", name, e);
            }
        }
    });
}

fn spawn_refresher(
    api: Arc<dyn NocApi>,
    tx: mpsc::Sender<SessionEvent>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // The initial fetch has already been issued.
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = stop.changed() => break,
                _ = ticker.tick() => {
                    if tx.is_closed() {
                        break;
                    }
                    tracing::debug!("Refreshing dashboard snapshots");
                    spawn_snapshot_fetches(&api, &tx);
                }
            }
        }
    })
}

async fn read_feed(
    feed: Arc<dyn RealtimeFeed>,
    tx: mpsc::Sender<SessionEvent>,
    mut stop: watch::Receiver<bool>,
) {
    let mut samples = tokio::select! {
        _ = stop.changed() => return,
        subscribed = feed.subscribe() => match subscribed {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!("Realtime feed unavailable: {}", e);
                return;
            }
        }
    };
    tracing::info!("Realtime feed connected");

    let mut received = 0usize;
    loop {
        tokio::select! {
            _ = stop.changed() => break,
            message = samples.next() => match message {
                Some(Ok(sample)) => {
                    received += 1;
                    if tx.send(SessionEvent::Sample(sample)).await.is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("Dropping realtime message: {}", e);
                }
                None => {
                    tracing::warn!("Realtime feed closed by peer after {} samples", received);
                    break;
                }
            }
        }
    }
    // Dropping the stream closes the connection.
}

async fn join_quietly(name: &str, handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        tracing::warn!("{} ended abnormally: {}", name, e);
    }
}
