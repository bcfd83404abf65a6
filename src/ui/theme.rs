//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::api::{AnalysisStatus, Signal};
use crate::data::{AlertSeverity, Emphasis, Tone};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Success role (green indicators, low risk).
    pub success: Color,
    /// Warning role (yellow indicators, medium risk).
    pub warning: Color,
    /// Danger role (red indicators, high risk).
    pub danger: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Unfilled part of the risk gauge.
    pub gauge_track: Color,
    /// Style for section headers.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            border: Color::Gray,
            gauge_track: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            border: Color::DarkGray,
            gauge_track: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }

    /// Style of a status indicator dot, from the backend's color tag.
    pub fn signal_style(&self, signal: Signal) -> Style {
        let color = match signal {
            Signal::Green => self.success,
            Signal::Yellow => self.warning,
            Signal::Red => self.danger,
        };
        Style::default().fg(color)
    }

    /// Get style for an analysis status
    pub fn status_style(&self, status: AnalysisStatus) -> Style {
        match status {
            AnalysisStatus::Normal => Style::default().fg(self.success),
            AnalysisStatus::Warning => Style::default().fg(self.warning),
            AnalysisStatus::Critical => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Alert box style: plain unless the analysis carries a severity.
    pub fn alert_style(&self, severity: Option<AlertSeverity>) -> Style {
        match severity {
            None => Style::default(),
            Some(AlertSeverity::Warning) => Style::default().fg(self.warning),
            Some(AlertSeverity::Critical) => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
        }
    }

    pub fn emphasis_style(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Emphasized => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            Emphasis::Moderate => Style::default().fg(self.warning),
            Emphasis::Default => Style::default(),
        }
    }
}
