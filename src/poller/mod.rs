//! Polling loops that keep the view models current.
//!
//! Two timers run side by side without coordinating: metrics every 2 s and
//! history every 5 s. Both fire immediately on start. Each tick spawns its
//! fetch as its own task so a slow response never delays the next tick;
//! overlapping responses are ordered by [`sequence`] tickets instead.
//!
//! ```text
//!  interval(2s) ──▶ spawn(MetricsPoller::refresh) ──▶ LiveBoard
//!  interval(5s) ──▶ spawn(HistoryPoller::refresh) ──▶ ChartManager
//!  key press    ──▶ ScenarioTrigger::trigger ──▶ MetricsPoller::refresh
//! ```

mod history;
mod metrics;
mod scenario;
pub mod sequence;

pub use history::{HistoryPoller, SharedCharts};
pub use metrics::{MetricsPoller, SharedBoard};
pub use scenario::{scenario_for_key, ScenarioTrigger, KNOWN_SCENARIOS};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::DashboardApi;
use crate::data::ChartManager;

/// Period of the live metrics poll.
pub const METRICS_INTERVAL: Duration = Duration::from_millis(2000);

/// Period of the trend history poll.
pub const HISTORY_INTERVAL: Duration = Duration::from_millis(5000);

/// The three dashboard components wired to one backend.
#[derive(Debug, Clone)]
pub struct Pollers {
    pub metrics: Arc<MetricsPoller>,
    pub history: Arc<HistoryPoller>,
    pub scenarios: Arc<ScenarioTrigger>,
}

impl Pollers {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        let metrics = Arc::new(MetricsPoller::new(api.clone()));
        let history = Arc::new(HistoryPoller::new(api.clone(), ChartManager::new()));
        let scenarios = Arc::new(ScenarioTrigger::new(api, metrics.clone()));
        Self {
            metrics,
            history,
            scenarios,
        }
    }

    /// Start both timers on the current tokio runtime.
    pub fn spawn(&self) -> PollingTasks {
        let metrics = self.metrics.clone();
        let history = self.history.clone();

        tracing::info!(
            metrics_ms = METRICS_INTERVAL.as_millis() as u64,
            history_ms = HISTORY_INTERVAL.as_millis() as u64,
            "Starting pollers"
        );

        PollingTasks {
            handles: vec![
                spawn_timer(METRICS_INTERVAL, move || {
                    let metrics = metrics.clone();
                    async move {
                        metrics.refresh().await;
                    }
                }),
                spawn_timer(HISTORY_INTERVAL, move || {
                    let history = history.clone();
                    async move {
                        history.refresh().await;
                    }
                }),
            ],
        }
    }
}

/// Handles to the running timer tasks.
#[derive(Debug)]
pub struct PollingTasks {
    handles: Vec<JoinHandle<()>>,
}

impl PollingTasks {
    /// Stop both timers. Fetches already in flight run to completion.
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

fn spawn_timer<F, Fut>(period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            timer.tick().await;
            tokio::spawn(tick());
        }
    })
}


#[cfg(test)]
mod tests {
    use super::fake::ScriptedApi;
    use super::*;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_fire_immediately_and_on_interval() {
        let api = Arc::new(ScriptedApi::default());
        let pollers = Pollers::new(api.clone());
        let tasks = pollers.spawn();

        settle().await;
        assert_eq!(api.metrics_calls(), 1);
        assert_eq!(api.history_calls(), 1);

        tokio::time::sleep(Duration::from_millis(4500)).await;
        settle().await;
        assert_eq!(api.metrics_calls(), 3);
        assert_eq!(api.history_calls(), 1);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(api.metrics_calls(), 3);
        assert_eq!(api.history_calls(), 2);

        tasks.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_adds_exactly_one_fetch() {
        let api = Arc::new(ScriptedApi::default());
        let pollers = Pollers::new(api.clone());
        let tasks = pollers.spawn();
        settle().await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        settle().await;
        let before = api.metrics_calls();

        pollers.scenarios.trigger("staff_shortage").await.unwrap();
        settle().await;
        assert_eq!(api.metrics_calls(), before + 1);

        // the timer was not reset: the next tick still lands at t = 2s
        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle().await;
        assert_eq!(api.metrics_calls(), before + 2);

        tasks.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_polling() {
        let api = Arc::new(ScriptedApi::default());
        let tasks = Pollers::new(api.clone()).spawn();
        settle().await;
        tasks.abort();

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(api.metrics_calls(), 1);
        assert_eq!(api.history_calls(), 1);
    }
}
