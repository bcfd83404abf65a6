//! Live metrics poller.

use std::sync::Arc;

use parking_lot::Mutex;

use super::sequence::{Sequenced, Sequencer, Ticket};
use crate::api::{DashboardApi, FetchError, MetricsResponse};
use crate::data::LiveBoard;

/// Live board shared between the poller (writer) and the TUI (reader).
pub type SharedBoard = Arc<Mutex<Sequenced<LiveBoard>>>;

/// Fetches `/api/metrics` and renders it into the [`LiveBoard`].
#[derive(Debug)]
pub struct MetricsPoller {
    api: Arc<dyn DashboardApi>,
    board: SharedBoard,
    sequencer: Sequencer,
}

impl MetricsPoller {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            api,
            board: Arc::new(Mutex::new(Sequenced::new(LiveBoard::new()))),
            sequencer: Sequencer::new(),
        }
    }

    /// Handle to the board this poller writes.
    pub fn board(&self) -> SharedBoard {
        self.board.clone()
    }

    /// Run one poll cycle.
    ///
    /// Returns `true` if the response was rendered. Failures are logged and
    /// leave the board untouched.
    pub async fn refresh(&self) -> bool {
        let ticket = self.sequencer.issue();
        let result = self.api.fetch_metrics().await;
        self.apply(ticket, result)
    }

    /// Apply the outcome of the cycle holding `ticket`.
    pub fn apply(&self, ticket: Ticket, result: Result<MetricsResponse, FetchError>) -> bool {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(ticket = ticket.value(), error = %e, "Error fetching metrics");
                return false;
            }
        };

        let applied = self.board.lock().apply_if_newer(ticket, |board| board.apply(&response));
        if applied {
            tracing::debug!(
                ticket = ticket.value(),
                timestamp = %response.timestamp,
                risk_score = ?response.risk_score,
                "Rendered metrics"
            );
        } else {
            tracing::debug!(ticket = ticket.value(), "Discarding stale metrics response");
        }
        applied
    }

    /// Number of metrics fetches started so far.
    pub fn fetch_count(&self) -> u64 {
        self.sequencer.issued()
    }

    /// Take a ticket without fetching, for callers that drive the request
    /// themselves and hand the result to [`MetricsPoller::apply`].
    pub fn issue_ticket(&self) -> Ticket {
        self.sequencer.issue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use crate::poller::fake::ScriptedApi;

    fn poller(api: ScriptedApi) -> (Arc<ScriptedApi>, MetricsPoller) {
        let api = Arc::new(api);
        let poller = MetricsPoller::new(api.clone());
        (api, poller)
    }

    #[tokio::test]
    async fn test_refresh_renders_board() {
        let api = ScriptedApi::default();
        api.push_metrics(Ok(fixtures::response("09:15:00", 75)));
        let (api, poller) = poller(api);

        assert!(poller.refresh().await);

        let board = poller.board();
        let board = board.lock();
        assert_eq!(board.value().timestamp.as_deref(), Some("09:15:00"));
        assert_eq!(board.value().gauge.map(|g| g.score), Some(75));
        assert_eq!(api.metrics_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_render() {
        let api = ScriptedApi::default();
        api.push_metrics(Ok(fixtures::response("09:15:00", 75)));
        api.push_metrics(Err(FetchError::Network("connection refused".to_string())));
        api.push_metrics(Err(FetchError::Decode("expected value at line 1".to_string())));
        api.push_metrics(Err(FetchError::Application("missing field `blood`".to_string())));
        let (_api, poller) = poller(api);

        assert!(poller.refresh().await);
        let before = poller.board().lock().value().clone();

        assert!(!poller.refresh().await);
        assert!(!poller.refresh().await);
        assert!(!poller.refresh().await);

        assert_eq!(poller.board().lock().value(), &before);
    }

    #[tokio::test]
    async fn test_failure_before_first_success_leaves_board_empty() {
        let api = ScriptedApi::default();
        api.push_metrics(Err(FetchError::Status(500)));
        let (_api, poller) = poller(api);

        assert!(!poller.refresh().await);
        assert!(!poller.board().lock().value().is_loaded());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (_api, poller) = poller(ScriptedApi::default());

        let slow = poller.issue_ticket();
        let fast = poller.issue_ticket();

        assert!(poller.apply(fast, Ok(fixtures::response("10:00:02", 20))));
        assert!(!poller.apply(slow, Ok(fixtures::response("10:00:00", 90))));

        let board = poller.board();
        let board = board.lock();
        assert_eq!(board.value().timestamp.as_deref(), Some("10:00:02"));
        assert_eq!(board.applied(), Some(fast));
    }

    #[test]
    fn test_failed_newer_cycle_does_not_block_older_success() {
        let (_api, poller) = poller(ScriptedApi::default());

        let older = poller.issue_ticket();
        let newer = poller.issue_ticket();

        assert!(!poller.apply(newer, Err(FetchError::Network("reset".to_string()))));
        assert!(poller.apply(older, Ok(fixtures::response("10:00:00", 5))));
    }
}
