//! Scenario trigger.

use std::sync::Arc;

use super::metrics::MetricsPoller;
use crate::api::{DashboardApi, FetchError, ScenarioAck};

/// Scenarios the backend simulator knows about, with their key bindings.
pub const KNOWN_SCENARIOS: [(char, &str); 4] = [
    ('o', "oxygen_fail"),
    ('i', "icu_surge"),
    ('s', "staff_shortage"),
    ('n', "normal"),
];

/// Look up the scenario bound to `key`.
pub fn scenario_for_key(key: char) -> Option<&'static str> {
    KNOWN_SCENARIOS.iter().find(|(k, _)| *k == key).map(|(_, name)| *name)
}

/// Posts scenarios to the backend and forces an immediate metrics refresh.
#[derive(Debug)]
pub struct ScenarioTrigger {
    api: Arc<dyn DashboardApi>,
    metrics: Arc<MetricsPoller>,
}

impl ScenarioTrigger {
    pub fn new(api: Arc<dyn DashboardApi>, metrics: Arc<MetricsPoller>) -> Self {
        Self { api, metrics }
    }

    /// Apply `name` on the backend.
    ///
    /// On success the acknowledgement is logged and one out-of-band metrics
    /// refresh runs; the regular timer is not touched. On failure nothing
    /// else happens.
    pub async fn trigger(&self, name: &str) -> Result<ScenarioAck, FetchError> {
        self.trigger_then(name, |_| {}).await
    }

    /// Like [`ScenarioTrigger::trigger`], calling `on_ack` as soon as the
    /// backend acknowledges and before the follow-up refresh starts.
    pub async fn trigger_then<F>(
        &self,
        name: &str,
        on_ack: F,
    ) -> Result<ScenarioAck, FetchError>
    where
        F: FnOnce(&ScenarioAck),
    {
        match self.api.trigger_scenario(name).await {
            Ok(ack) => {
                tracing::info!(scenario = name, "{}", ack.message);
                on_ack(&ack);
                self.metrics.refresh().await;
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(scenario = name, error = %e, "Error triggering scenario");
                Err(e)
            }
        }
    }
}
