//! Application state and user actions.

use std::path::Path;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::commands::write_export;
use crate::poller::{Pollers, SharedBoard, SharedCharts};
use crate::ui::Theme;

/// Where the in-app export key writes.
pub const EXPORT_PATH: &str = "wardwatch_export.json";

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Subsystem cards, risk gauge, recommendations and thresholds.
    Live,
    /// Trend charts from the metric history.
    Trends,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Live => View::Trends,
            View::Trends => View::Live,
        }
    }

    /// Cycle to the previous view. With two views this is the same as `next`.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Live => "Live",
            View::Trends => "Trends",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Backend
    pollers: Pollers,
    runtime: Handle,
    description: String,
    pub board: SharedBoard,
    pub charts: SharedCharts,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
    notices_tx: mpsc::UnboundedSender<String>,
    notices_rx: mpsc::UnboundedReceiver<String>,
}

impl App {
    /// Create a new App driving `pollers` on `runtime`.
    pub fn new(pollers: Pollers, runtime: Handle, description: &str, theme: Theme) -> Self {
        let (notices_tx, notices_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            current_view: View::Live,
            show_help: false,
            board: pollers.metrics.board(),
            charts: pollers.history.charts(),
            pollers,
            runtime,
            description: description.to_string(),
            theme,
            status_message: None,
            notices_tx,
            notices_rx,
        }
    }

    /// Returns a description of the backend.
    pub fn source_description(&self) -> &str {
        &self.description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Pick up notices from background tasks. Called once per frame.
    pub fn drain_notices(&mut self) {
        while let Ok(message) = self.notices_rx.try_recv() {
            self.set_status_message(message);
        }
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Poll metrics and history now, outside the timers.
    pub fn refresh_now(&mut self) {
        let metrics = self.pollers.metrics.clone();
        let history = self.pollers.history.clone();
        self.runtime.spawn(async move {
            metrics.refresh().await;
        });
        self.runtime.spawn(async move {
            history.refresh().await;
        });
        self.set_status_message("Refreshing...".to_string());
    }

    /// Trigger `name` on the backend in the background.
    ///
    /// The acknowledgement shows up as a status message as soon as it
    /// arrives, without waiting for the follow-up metrics refresh. Failures
    /// are only logged.
    pub fn trigger_scenario(&mut self, name: &str) {
        let scenarios = self.pollers.scenarios.clone();
        let notices = self.notices_tx.clone();
        let name = name.to_string();
        self.runtime.spawn(async move {
            let _ = scenarios
                .trigger_then(&name, |ack| {
                    let _ = notices.send(ack.message.clone());
                })
                .await;
        });
    }

    /// Export the current board to [`EXPORT_PATH`].
    pub fn export(&mut self) {
        self.export_to(Path::new(EXPORT_PATH));
    }

    /// Export the current board to `path`.
    pub fn export_to(&mut self, path: &Path) {
        // Snapshot first; the write must not hold the poller's lock
        let board = self.board.lock().value().clone();
        match write_export(&board, path) {
            Ok(()) => self.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => self.set_status_message(format!("Export failed: {}", e)),
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
