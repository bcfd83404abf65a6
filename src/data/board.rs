//! Live status board: everything the metrics poller renders.

use crate::api::{AnalysisStatus, MetricsResponse, Thresholds};

use super::cards::{format_reading, Subsystem, SubsystemCard};
use super::recommendations::{render_list, RecommendationItem};
use super::risk::RiskGauge;

/// One row of the thresholds panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdRow {
    pub label: &'static str,
    pub value: String,
}

/// Rendered state of the live view.
///
/// [`LiveBoard::apply`] is the only writer. It takes an already-decoded
/// response; a failed fetch never reaches here and leaves the board as it
/// was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveBoard {
    pub timestamp: Option<String>,
    pub cards: Vec<SubsystemCard>,
    pub gauge: Option<RiskGauge>,
    pub recommendations: Vec<RecommendationItem>,
    pub thresholds: Vec<ThresholdRow>,
    pub config: Option<Thresholds>,
}

impl LiveBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one response has been applied.
    pub fn is_loaded(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Render a metrics response into the board.
    ///
    /// Timestamp and cards are always replaced. The gauge, recommendations
    /// and thresholds are replaced only when the response carries them.
    pub fn apply(&mut self, response: &MetricsResponse) {
        self.timestamp = Some(response.timestamp.clone());
        if let Some(score) = response.risk_score {
            self.gauge = Some(RiskGauge::new(score));
        }
        if let Some(ref recs) = response.recommendations {
            self.recommendations = render_list(recs);
        }
        if let Some(ref config) = response.config {
            self.thresholds = threshold_rows(config);
            self.config = Some(config.clone());
        }
        self.cards = Subsystem::ALL
            .iter()
            .map(|&s| {
                SubsystemCard::from_analysis(s, &response.metrics, s.analysis(&response.analysis))
            })
            .collect();
    }

    pub fn card(&self, subsystem: Subsystem) -> Option<&SubsystemCard> {
        self.cards.iter().find(|c| c.subsystem == subsystem)
    }

    /// Count cards by status: (normal, warning, critical).
    pub fn status_counts(&self) -> (usize, usize, usize) {
        self.cards.iter().fold((0, 0, 0), |(n, w, c), card| match card.status {
            AnalysisStatus::Normal => (n + 1, w, c),
            AnalysisStatus::Warning => (n, w + 1, c),
            AnalysisStatus::Critical => (n, w, c + 1),
        })
    }

    /// Worst status across all cards.
    pub fn worst_status(&self) -> AnalysisStatus {
        self.cards.iter().map(|c| c.status).max().unwrap_or(AnalysisStatus::Normal)
    }

    /// Summary of the board as JSON, used by the export paths.
    pub fn to_export_json(&self) -> serde_json::Value {
        let (normal, warning, critical) = self.status_counts();

        let subsystems: Vec<serde_json::Value> = self
            .cards
            .iter()
            .map(|card| {
                serde_json::json!({
                    "subsystem": card.subsystem,
                    "status": card.status,
                    "message": card.alert.message,
                    "fields": card.fields.iter().map(|f| {
                        serde_json::json!({ "label": f.label, "value": f.value })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp,
            "risk": self.gauge.map(|g| serde_json::json!({
                "score": g.score,
                "band": g.band.label(),
                "angle_degrees": g.angle_degrees(),
            })),
            "summary": {
                "normal": normal,
                "warning": warning,
                "critical": critical,
            },
            "subsystems": subsystems,
            "recommendations": self.recommendations,
            "thresholds": self.config,
        })
    }
}

fn threshold_rows(config: &Thresholds) -> Vec<ThresholdRow> {
    [
        ("Oxygen critical level (%)", config.oxygen_critical_level),
        ("Bed occupancy critical (%)", config.bed_occupancy_critical),
        ("ICU occupancy critical (%)", config.icu_occupancy_critical),
        ("Staff safe ratio", config.staff_safe_ratio),
        ("Pharmacy min stock", config.pharmacy_min_stock),
        ("Ventilator critical (%)", config.ventilator_critical_percent),
        ("Blood critical level", config.blood_critical_level),
    ]
    .into_iter()
    .map(|(label, value)| ThresholdRow {
        label,
        value: format_reading(value),
    })
    .collect()
}
