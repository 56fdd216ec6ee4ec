// Dashboard session - owns the display state and notifies observers
use crate::domain::dashboard::DashboardState;
use crate::domain::inventory::{Alert, Device, Insight};
use crate::domain::telemetry::{MetricSample, NetworkMetrics};
use crate::domain::topology::Topology;
use chrono::Utc;

/// Input to a session. Samples are appended; every other variant replaces the
/// corresponding snapshot wholesale.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Sample(MetricSample),
    Devices(Vec<Device>),
    Alerts(Vec<Alert>),
    NetworkMetrics(NetworkMetrics),
    Topology(Topology),
    Insights(Vec<Insight>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    LiveMetrics,
    Devices,
    Alerts,
    NetworkMetrics,
    Topology,
    Insights,
    Closed,
}

/// Called synchronously after every change to the session.
pub trait SessionObserver: Send {
    fn on_update(&mut self, update: SessionUpdate, state: &DashboardState);
}

impl<F> SessionObserver for F
where
    F: FnMut(SessionUpdate, &DashboardState) + Send,
{
    fn on_update(&mut self, update: SessionUpdate, state: &DashboardState) {
        self(update, state)
    }
}

pub struct DashboardSession {
    state: DashboardState,
    observers: Vec<Box<dyn SessionObserver>>,
    closed: bool,
}

impl DashboardSession {
    pub fn new(live_window: usize) -> Self {
        Self {
            state: DashboardState::new(live_window),
            observers: Vec::new(),
            closed: false,
        }
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Apply one event. Returns false if the session is already closed and
    /// the event was discarded.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if self.is_closed() {
            tracing::debug!("Discarding {:?} for closed session", Self::update_kind(&event));
            return false;
        }

        let update = Self::update_kind(&event);
        match event {
            SessionEvent::Sample(sample) => self.state.live.append(sample),
            SessionEvent::Devices(devices) => self.state.devices = devices,
            SessionEvent::Alerts(alerts) => self.state.alerts = alerts,
            SessionEvent::NetworkMetrics(metrics) => self.state.network_metrics = metrics,
            SessionEvent::Topology(topology) => self.state.topology = topology,
            SessionEvent::Insights(insights) => self.state.insights = insights,
        }
        self.state.last_updated = Some(Utc::now());

        self.notify(update);
        true
    }

    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        self.closed = true;
        self.notify(SessionUpdate::Closed);
    }

    fn notify(&mut self, update: SessionUpdate) {
        for observer in self.observers.iter_mut() {
            observer.on_update(update, &self.state);
        }
    }

    fn update_kind(event: &SessionEvent) -> SessionUpdate {
        match event {
            SessionEvent::Sample(_) => SessionUpdate::LiveMetrics,
            SessionEvent::Devices(_) => SessionUpdate::Devices,
            SessionEvent::Alerts(_) => SessionUpdate::Alerts,
            SessionEvent::NetworkMetrics(_) => SessionUpdate::NetworkMetrics,
            SessionEvent::Topology(_) => SessionUpdate::Topology,
            SessionEvent::Insights(_) => SessionUpdate::Insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::{DeviceStatus, Severity};
    use std::sync::{Arc, Mutex};

    fn device(id: &str) -> Device {
        Device {
            id: id.to_string(),
            name: id.to_uppercase(),
            ip: "10.0.0.1".to_string(),
            kind: "switch".to_string(),
            status: DeviceStatus::Up,
            location: "DC1".to_string(),
            cpu_usage: Some(12.8),
            memory_usage: Some(45.1),
        }
    }

    fn alert(id: &str) -> Alert {
        Alert {
            id: id.to_string(),
            title: "High CPU Usage".to_string(),
            description: String::new(),
            severity_label: "warning".to_string(),
            severity: Severity::Warning,
            timestamp: "2 minutes ago".to_string(),
            device: None,
        }
    }

    fn recording_session() -> (DashboardSession, Arc<Mutex<Vec<SessionUpdate>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = DashboardSession::new(50);
        let sink = seen.clone();
        session.subscribe(move |update: SessionUpdate, _: &DashboardState| {
            sink.lock().unwrap().push(update);
        });
        (session, seen)
    }

    #[test]
    fn test_samples_append_to_live_buffer() {
        let (mut session, seen) = recording_session();
        for ts in 1..=3 {
            assert!(session.apply(SessionEvent::Sample(MetricSample::new(ts, Some(1.0), None, None))));
        }

        let ts: Vec<i64> = session.state().live.snapshot().iter().map(|s| s.time_ms).collect();
        assert_eq!(ts, vec![1, 2, 3]);
        assert_eq!(seen.lock().unwrap().len(), 3);
        assert!(session.state().last_updated.is_some());
    }

    #[test]
    fn test_snapshots_replace_instead_of_merge() {
        let (mut session, _) = recording_session();
        session.apply(SessionEvent::Devices(vec![device("a"), device("b")]));
        session.apply(SessionEvent::Devices(vec![device("c")]));
        session.apply(SessionEvent::Alerts(vec![alert("1")]));
        session.apply(SessionEvent::Alerts(Vec::new()));

        let ids: Vec<&str> = session.state().devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert!(session.state().alerts.is_empty());
    }

    #[test]
    fn test_snapshot_does_not_touch_live_buffer() {
        let (mut session, _) = recording_session();
        session.apply(SessionEvent::Sample(MetricSample::new(1, Some(1.0), None, None)));
        session.apply(SessionEvent::NetworkMetrics(NetworkMetrics::default()));
        assert_eq!(session.state().live.len(), 1);
    }

    #[test]
    fn test_observer_sees_each_update_kind() {
        let (mut session, seen) = recording_session();
        session.apply(SessionEvent::Topology(Topology::default()));
        session.apply(SessionEvent::Insights(Vec::new()));
        session.close();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionUpdate::Topology, SessionUpdate::Insights, SessionUpdate::Closed]
        );
    }

    #[test]
    fn test_events_after_close_are_discarded() {
        let (mut session, seen) = recording_session();
        session.close();
        session.close();

        assert!(!session.apply(SessionEvent::Devices(vec![device("late")])));
        assert!(!session.apply(SessionEvent::Sample(MetricSample::new(1, None, None, None))));
        assert!(session.state().devices.is_empty());
        assert!(session.state().live.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![SessionUpdate::Closed]);
    }
}
