// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # wardwatch
//!
//! A terminal dashboard for a hospital resource-monitoring backend.
//!
//! The backend simulates hospital resources (oxygen, beds, staff, pharmacy,
//! blood, ventilators), analyses them, and exposes the results over a small
//! HTTP JSON API. This crate polls that API and renders live subsystem cards,
//! a risk gauge, recommendations, and trend charts in an interactive TUI. It
//! can also trigger simulated scenarios on the backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ poller  │───▶│   data   │───▶│    ui    │───▶│ Terminal│  │
//! │  │(timers) │    │(view models)  │(rendering)│    │         │  │
//! │  └────┬────┘    └──────────┘    └──────────┘    └─────────┘  │
//! │       │                               ▲                      │
//! │       ▼                               │                      │
//! │  ┌─────────┐                     ┌────┴────┐                 │
//! │  │   api   │◀── HttpApi          │   app   │◀── events       │
//! │  │ (HTTP)  │                     │ (state) │                 │
//! │  └─────────┘                     └─────────┘                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: Wire types, [`FetchError`], and the [`DashboardApi`] trait
//!   with its reqwest-backed [`HttpApi`] implementation
//! - **[`data`]**: Terminal-free view models: [`LiveBoard`] (cards, gauge,
//!   recommendations, thresholds) and [`ChartManager`] (trend charts)
//! - **[`poller`]**: The 2 s metrics and 5 s history timers, scenario
//!   triggering, and the ticket ordering that discards stale responses
//! - **[`app`]** / **[`events`]** / **[`ui`]**: TUI state, key handling, and
//!   ratatui rendering
//! - **[`commands`]**: One-shot export and settings operations
//! - **[`config`]** / **[`logging`]**: Layered settings and file logging
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a backend on the default address
//! wardwatch
//!
//! # Watch another backend, then trigger a scenario without the TUI
//! wardwatch --url http://10.0.0.5:5000
//! wardwatch --scenario icu_surge
//!
//! # Export the current board and exit
//! wardwatch --export board.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use wardwatch::{HttpApi, Pollers};
//!
//! # tokio_test::block_on(async {
//! let api = HttpApi::builder().base_url("http://127.0.0.1:5000").build()?;
//! let pollers = Pollers::new(Arc::new(api));
//!
//! // One cycle by hand; `pollers.spawn()` runs them on timers instead.
//! pollers.metrics.refresh().await;
//! let board = pollers.metrics.board();
//! println!("{:?}", board.lock().value().gauge);
//! # Ok::<_, wardwatch::FetchError>(())
//! # });
//! ```

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod poller;
pub mod ui;

// Re-export main types for convenience
pub use api::{
    DashboardApi, FetchError, HistoryPoint, HttpApi, HttpApiBuilder, MetricsResponse,
    ScenarioAck, Thresholds,
};
pub use app::{App, View};
pub use config::Settings;
pub use data::{ChartManager, LiveBoard, RiskBand, RiskGauge};
pub use poller::{HistoryPoller, MetricsPoller, Pollers, ScenarioTrigger};
