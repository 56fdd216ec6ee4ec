// Console renderer - redraws the selected view when the session changes
use crate::application::session::{SessionObserver, SessionUpdate};
use crate::domain::dashboard::DashboardState;
use crate::presentation::render;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Topology,
    Insights,
    Alerts,
}

impl View {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "overview" => Some(View::Overview),
            "topology" => Some(View::Topology),
            "insights" | "ai-insights" => Some(View::Insights),
            "alerts" => Some(View::Alerts),
            _ => None,
        }
    }

    /// Whether a change of this kind can alter what the view shows.
    pub fn shows(&self, update: SessionUpdate) -> bool {
        match self {
            View::Overview => !matches!(update, SessionUpdate::Topology | SessionUpdate::Insights),
            View::Topology => update == SessionUpdate::Topology,
            View::Insights => update == SessionUpdate::Insights,
            View::Alerts => update == SessionUpdate::Alerts,
        }
    }

    pub fn render(&self, state: &DashboardState) -> String {
        match self {
            View::Overview => render::render_overview(state),
            View::Topology => render::render_topology(&state.topology),
            View::Insights => render::render_insights(&state.insights),
            View::Alerts => render::render_alert_list(&state.alerts),
        }
    }
}

pub struct ConsoleObserver<W: Write + Send> {
    out: W,
    view: View,
    frames: usize,
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W, view: View) -> Self {
        Self {
            out,
            view,
            frames: 0,
        }
    }

    fn draw(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(72))?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write + Send> SessionObserver for ConsoleObserver<W> {
    fn on_update(&mut self, update: SessionUpdate, state: &DashboardState) {
        let text = if update == SessionUpdate::Closed {
            format!("Session closed after {} frames.\n", self.frames)
        } else if self.view.shows(update) {
            self.frames += 1;
            self.view.render(state)
        } else {
            return;
        };

        if let Err(e) = self.draw(&text) {
            tracing::warn!("Failed to draw {:?} view: {}", self.view, e);
        }
    }
}
