//! Backend API abstraction.
//!
//! The dashboard consumes an external HTTP JSON API. [`DashboardApi`] is the
//! seam between the pollers and that backend: [`HttpApi`] talks to a real
//! server, tests plug in scripted fakes.

mod client;
mod error;
mod models;

pub use client::{HttpApi, HttpApiBuilder, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use models::{
    Analysis, AnalysisSet, AnalysisStatus, HistoryPoint, Metrics, MetricsResponse, Priority,
    Recommendation, ScenarioAck, SettingsAck, Signal, ThresholdOverrides, Thresholds,
};

#[cfg(test)]
pub(crate) use models::fixtures;

use std::fmt::Debug;

use async_trait::async_trait;

/// Operations the dashboard performs against its backend.
///
/// Each call is one self-contained request; implementations do not retry.
#[async_trait]
pub trait DashboardApi: Send + Sync + Debug {
    /// `GET /api/metrics`: current readings, analysis, thresholds, risk and
    /// recommendations.
    async fn fetch_metrics(&self) -> Result<MetricsResponse, FetchError>;

    /// `GET /api/history/metrics`: past snapshots, oldest first.
    async fn fetch_history(&self) -> Result<Vec<HistoryPoint>, FetchError>;

    /// `POST /api/scenario/{name}`: apply a simulated event on the backend.
    async fn trigger_scenario(&self, name: &str) -> Result<ScenarioAck, FetchError>;

    /// `POST /api/settings`: override threshold constants.
    async fn update_settings(&self, overrides: &ThresholdOverrides)
        -> Result<SettingsAck, FetchError>;

    /// Returns a human-readable description of the backend.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
