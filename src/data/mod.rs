//! View models for the dashboard.
//!
//! This module turns decoded backend responses into plain, terminal-free view
//! state. Each UI region has one entry point taking typed input, so the
//! rendering rules can be tested without drawing anything.
//!
//! ## Submodules
//!
//! - [`board`]: [`LiveBoard`], the whole live view, written by the metrics poller
//! - [`cards`]: per-subsystem cards with status indicator and alert box
//! - [`risk`]: risk banding and gauge angle math
//! - [`recommendations`]: priority-styled recommendation list
//! - [`charts`]: [`ChartManager`] and the four trend charts, written by the
//!   history poller
//!
//! ## Data Flow
//!
//! ```text
//! MetricsResponse (decoded JSON)        Vec<HistoryPoint>
//!        │                                     │
//!        ▼                                     ▼
//! LiveBoard::apply()                 ChartManager::apply_history()
//!        │                                     │
//!        ├──▶ SubsystemCard × 6                └──▶ Chart × 4 (full replace)
//!        ├──▶ RiskGauge
//!        ├──▶ RecommendationItem list
//!        └──▶ ThresholdRow list
//! ```

pub mod board;
pub mod cards;
pub mod charts;
pub mod recommendations;
pub mod risk;

pub use board::{LiveBoard, ThresholdRow};
pub use cards::{AlertBox, AlertSeverity, Field, Subsystem, SubsystemCard};
pub use charts::{Chart, ChartKind, ChartManager, ChartStyle, Dataset, Series};
pub use recommendations::{Emphasis, RecommendationItem};
pub use risk::{RiskBand, RiskGauge, Tone};
