//! Terminal rendering using ratatui.
//!
//! Every render function reads a snapshot of the view models taken once per
//! frame, so the pollers never wait on the draw loop.
//!
//! - [`common`]: header, tabs, status bar and help overlay
//! - [`live`]: subsystem cards, risk gauge, recommendations, thresholds
//! - [`trends`]: the four history charts
//! - [`theme`]: light/dark color roles

pub mod common;
pub mod live;
pub mod theme;
pub mod trends;

pub use theme::Theme;
