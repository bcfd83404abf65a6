//! Trend history poller.

use std::sync::Arc;

use parking_lot::Mutex;

use super::sequence::{Sequenced, Sequencer, Ticket};
use crate::api::{DashboardApi, FetchError, HistoryPoint};
use crate::data::ChartManager;

/// Charts shared between the poller (writer) and the TUI (reader).
pub type SharedCharts = Arc<Mutex<Sequenced<ChartManager>>>;

/// Fetches `/api/history/metrics` and replaces every chart's series.
#[derive(Debug)]
pub struct HistoryPoller {
    api: Arc<dyn DashboardApi>,
    charts: SharedCharts,
    sequencer: Sequencer,
}

impl HistoryPoller {
    /// Create a poller that owns `charts` from now on.
    pub fn new(api: Arc<dyn DashboardApi>, charts: ChartManager) -> Self {
        Self {
            api,
            charts: Arc::new(Mutex::new(Sequenced::new(charts))),
            sequencer: Sequencer::new(),
        }
    }

    /// Handle to the charts this poller writes.
    pub fn charts(&self) -> SharedCharts {
        self.charts.clone()
    }

    /// Run one poll cycle. Returns `true` if the series was applied.
    pub async fn refresh(&self) -> bool {
        let ticket = self.sequencer.issue();
        let result = self.api.fetch_history().await;
        self.apply(ticket, result)
    }

    /// Apply the outcome of the cycle holding `ticket`.
    pub fn apply(&self, ticket: Ticket, result: Result<Vec<HistoryPoint>, FetchError>) -> bool {
        let history = match result {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(ticket = ticket.value(), error = %e, "Error updating charts");
                return false;
            }
        };

        let applied = self
            .charts
            .lock()
            .apply_if_newer(ticket, |charts| charts.apply_history(&history));
        if applied {
            tracing::debug!(ticket = ticket.value(), points = history.len(), "Redrew charts");
        } else {
            tracing::debug!(ticket = ticket.value(), "Discarding stale history response");
        }
        applied
    }

    /// Number of history fetches started so far.
    pub fn fetch_count(&self) -> u64 {
        self.sequencer.issued()
    }

    pub fn issue_ticket(&self) -> Ticket {
        self.sequencer.issue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use crate::data::ChartKind;
    use crate::poller::fake::ScriptedApi;

    fn poller(api: ScriptedApi) -> HistoryPoller {
        HistoryPoller::new(Arc::new(api), ChartManager::new())
    }

    #[tokio::test]
    async fn test_dataset_length_tracks_latest_series() {
        let api = ScriptedApi::default();
        api.push_history(Ok(fixtures::history(50)));
        api.push_history(Ok(fixtures::history(12)));
        let poller = poller(api);

        assert!(poller.refresh().await);
        assert_eq!(poller.charts().lock().value().series_len(), 50);

        assert!(poller.refresh().await);
        let charts = poller.charts();
        let charts = charts.lock();
        for chart in charts.value().charts() {
            assert_eq!(chart.labels.len(), 12);
            assert!(chart.datasets.iter().all(|d| d.points.len() == 12));
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_series() {
        let api = ScriptedApi::default();
        api.push_history(Ok(fixtures::history(8)));
        api.push_history(Err(FetchError::Network("timed out".to_string())));
        let poller = poller(api);

        assert!(poller.refresh().await);
        let before = poller.charts().lock().value().clone();

        assert!(!poller.refresh().await);
        assert_eq!(poller.charts().lock().value(), &before);
        assert_eq!(poller.fetch_count(), 2);
    }

    #[test]
    fn test_stale_series_is_discarded() {
        let poller = poller(ScriptedApi::default());
        let slow = poller.issue_ticket();
        let fast = poller.issue_ticket();

        assert!(poller.apply(fast, Ok(fixtures::history(4))));
        assert!(!poller.apply(slow, Ok(fixtures::history(9))));

        let charts = poller.charts();
        let charts = charts.lock();
        assert_eq!(charts.value().chart(ChartKind::Stock).len(), 4);
    }
}
