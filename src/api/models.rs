//! Wire types for the dashboard backend.
//!
//! These mirror the JSON the backend emits. Readings, analyses and the
//! timestamp are required: a payload missing e.g. `analysis.blood` fails to
//! decode rather than rendering a half-empty card. The thresholds, risk score
//! and recommendations may be absent; the board then leaves those regions as
//! they were.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One point-in-time set of resource readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub oxygen_level: f64,
    pub oxygen_consumption: f64,
    pub oxygen_refill: f64,
    pub bed_occupancy: f64,
    pub icu_occupancy: f64,
    pub staff_available: f64,
    pub patient_inflow: f64,
    pub pharmacy_stock: f64,
    pub pharmacy_consumption: f64,
    pub pharmacy_restock: f64,
    pub blood_stock: f64,
    pub blood_consumption: f64,
    pub blood_restock: f64,
    pub ventilators_in_use: f64,
    pub total_ventilators: f64,
}

/// Backend classification of a subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Normal,
    Warning,
    Critical,
}

impl AnalysisStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            AnalysisStatus::Normal => "OK",
            AnalysisStatus::Warning => "WARN",
            AnalysisStatus::Critical => "CRIT",
        }
    }
}

/// Color tag attached to an analysis by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Green,
    Yellow,
    Red,
}

/// Status, color tag and message for one subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub status: AnalysisStatus,
    pub color: Signal,
    pub message: String,
}

/// Per-subsystem analysis set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSet {
    pub oxygen: Analysis,
    pub beds: Analysis,
    pub staff: Analysis,
    pub pharmacy: Analysis,
    pub blood: Analysis,
    pub ventilators: Analysis,
}

/// Threshold constants the backend evaluates against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Thresholds {
    pub oxygen_critical_level: f64,
    pub oxygen_per_patient: f64,
    pub bed_occupancy_critical: f64,
    pub icu_occupancy_critical: f64,
    pub staff_safe_ratio: f64,
    pub pharmacy_min_stock: f64,
    pub meds_per_patient: f64,
    pub ventilator_critical_percent: f64,
    pub blood_critical_level: f64,
}

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A suggested action from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub message: String,
    pub priority: Priority,
    pub action: String,
}

/// Body of `GET /api/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub timestamp: String,
    pub metrics: Metrics,
    pub analysis: AnalysisSet,
    #[serde(default)]
    pub config: Option<Thresholds>,
    #[serde(default)]
    pub risk_score: Option<u8>,
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

/// One element of `GET /api/history/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: String,
    pub metrics: Metrics,
}

/// Body of `POST /api/scenario/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAck {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsAck {
    pub status: String,
    pub config: Thresholds,
}

/// Threshold overrides sent to `POST /api/settings`, keyed by constant name.
pub type ThresholdOverrides = BTreeMap<String, serde_json::Number>;


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "timestamp": "14:02:11",
            "metrics": {
                "oxygen_level": 25, "oxygen_consumption": 15, "oxygen_refill": 5,
                "bed_occupancy": 95, "icu_occupancy": 98, "patient_inflow": 20,
                "staff_available": 5,
                "pharmacy_stock": 40, "pharmacy_consumption": 8, "pharmacy_restock": 3,
                "total_ventilators": 20, "ventilators_in_use": 19,
                "blood_stock": 15, "blood_consumption": 2, "blood_restock": 1
            },
            "analysis": {
                "oxygen": {"status": "Critical", "message": "High risk: oxygen shortage soon", "color": "red"},
                "beds": {"status": "Critical", "message": "ICU near collapse", "color": "red"},
                "staff": {"status": "Normal", "message": "Staffing levels adequate.", "color": "green"},
                "pharmacy": {"status": "Critical", "message": "Low stock: reorder now", "color": "red"},
                "ventilators": {"status": "Critical", "message": "Ventilators near capacity!", "color": "red"},
                "blood": {"status": "Critical", "message": "CRITICAL: Blood stock dangerously low!", "color": "red"}
            },
            "risk_score": 95,
            "recommendations": [
                {"priority": "High", "message": "Oxygen levels critical", "action": "Initiate emergency refill"},
                {"priority": "High", "message": "ICU Full", "action": "Divert ambulances"},
                {"priority": "Medium", "message": "Pharmacy stock low", "action": "Order resupply"}
            ],
            "config": {
                "OXYGEN_CRITICAL_LEVEL": 30, "OXYGEN_PER_PATIENT": 0.5,
                "BED_OCCUPANCY_CRITICAL": 85, "ICU_OCCUPANCY_CRITICAL": 90,
                "STAFF_SAFE_RATIO": 4, "PHARMACY_MIN_STOCK": 50, "MEDS_PER_PATIENT": 0.1,
                "VENTILATOR_CRITICAL_PERCENT": 90, "BLOOD_CRITICAL_LEVEL": 20
            }
        }"#
    }

    #[test]
    fn test_decode_metrics_response() {
        let response: MetricsResponse = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(response.timestamp, "14:02:11");
        assert_eq!(response.metrics.oxygen_level, 25.0);
        assert_eq!(response.analysis.beds.status, AnalysisStatus::Critical);
        assert_eq!(response.analysis.staff.color, Signal::Green);
        assert_eq!(response.config.map(|c| c.oxygen_per_patient), Some(0.5));
        assert_eq!(response.risk_score, Some(95));
        let recs = response.recommendations.unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[2].priority, Priority::Medium);
    }

    #[test]
    fn test_optional_sections_may_be_absent() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("config");
        object.remove("risk_score");
        object.remove("recommendations");

        let response: MetricsResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.timestamp, "14:02:11");
        assert!(response.config.is_none());
        assert!(response.risk_score.is_none());
        assert!(response.recommendations.is_none());
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value.as_object_mut().unwrap().remove("timestamp");
        assert!(serde_json::from_value::<MetricsResponse>(value).is_err());
    }

    #[test]
    fn test_missing_subsystem_analysis_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["analysis"].as_object_mut().unwrap().remove("blood");

        let result = serde_json::from_value::<MetricsResponse>(value);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("blood"));
    }

    #[test]
    fn test_unknown_color_tag_is_rejected() {
        let json = r#"{"status": "Normal", "message": "ok", "color": "purple"}"#;
        assert!(serde_json::from_str::<Analysis>(json).is_err());
    }

    #[test]
    fn test_scenario_ack_without_status() {
        let ack: ScenarioAck = serde_json::from_str(r#"{"message": "Scenario normal triggered"}"#)
            .unwrap();
        assert_eq!(ack.message, "Scenario normal triggered");
        assert!(ack.status.is_none());
    }

    #[test]
    fn test_status_ordering() {
        assert!(AnalysisStatus::Critical > AnalysisStatus::Warning);
        assert!(AnalysisStatus::Warning > AnalysisStatus::Normal);
        assert_eq!(AnalysisStatus::Warning.symbol(), "WARN");
    }
}
