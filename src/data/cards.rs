//! Subsystem status cards.
//!
//! A card is rebuilt from scratch on every apply, so the indicator and alert
//! box never carry state over from a previous cycle.

use serde::Serialize;

use crate::api::{Analysis, AnalysisSet, AnalysisStatus, Metrics, Signal};

/// Hospital subsystems shown as cards on the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Oxygen,
    Beds,
    Staff,
    Pharmacy,
    Blood,
    Ventilators,
}

impl Subsystem {
    /// All subsystems in display order.
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Oxygen,
        Subsystem::Beds,
        Subsystem::Staff,
        Subsystem::Pharmacy,
        Subsystem::Blood,
        Subsystem::Ventilators,
    ];

    /// Returns the card title.
    pub fn title(&self) -> &'static str {
        match self {
            Subsystem::Oxygen => "Oxygen Supply",
            Subsystem::Beds => "Bed Capacity",
            Subsystem::Staff => "Staffing",
            Subsystem::Pharmacy => "Pharmacy",
            Subsystem::Blood => "Blood Bank",
            Subsystem::Ventilators => "Ventilators",
        }
    }

    /// Select this subsystem's analysis from the backend set.
    pub fn analysis<'a>(&self, set: &'a AnalysisSet) -> &'a Analysis {
        match self {
            Subsystem::Oxygen => &set.oxygen,
            Subsystem::Beds => &set.beds,
            Subsystem::Staff => &set.staff,
            Subsystem::Pharmacy => &set.pharmacy,
            Subsystem::Blood => &set.blood,
            Subsystem::Ventilators => &set.ventilators,
        }
    }

    fn fields(&self, m: &Metrics) -> Vec<Field> {
        match self {
            Subsystem::Oxygen => vec![
                Field::reading("Level (%)", m.oxygen_level),
                Field::reading("Consumption /hr", m.oxygen_consumption),
                Field::reading("Refill /hr", m.oxygen_refill),
            ],
            Subsystem::Beds => vec![
                Field::reading("Bed occupancy (%)", m.bed_occupancy),
                Field::reading("ICU occupancy (%)", m.icu_occupancy),
            ],
            Subsystem::Staff => vec![
                Field::reading("Staff available", m.staff_available),
                Field::reading("Patient inflow /hr", m.patient_inflow),
            ],
            Subsystem::Pharmacy => vec![
                Field::reading("Stock", m.pharmacy_stock),
                Field::reading("Consumption /hr", m.pharmacy_consumption),
                Field::reading("Restock /hr", m.pharmacy_restock),
            ],
            Subsystem::Blood => vec![
                Field::reading("Stock (units)", m.blood_stock),
                Field::reading("Consumption /hr", m.blood_consumption),
                Field::reading("Restock /hr", m.blood_restock),
            ],
            Subsystem::Ventilators => vec![
                Field::reading("In use", m.ventilators_in_use),
                Field::reading("Total", m.total_ventilators),
                Field {
                    label: "Usage (%)",
                    value: usage_percent(m.ventilators_in_use, m.total_ventilators)
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                },
            ],
        }
    }
}

/// A labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn reading(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: format_reading(value),
        }
    }
}

/// Severity class applied to an alert box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Only Warning and Critical analyses decorate the alert box.
    pub fn from_status(status: AnalysisStatus) -> Option<Self> {
        match status {
            AnalysisStatus::Normal => None,
            AnalysisStatus::Warning => Some(AlertSeverity::Warning),
            AnalysisStatus::Critical => Some(AlertSeverity::Critical),
        }
    }
}

/// The message box under a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertBox {
    pub message: String,
    pub severity: Option<AlertSeverity>,
}

/// Rendered state of one subsystem card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsystemCard {
    pub subsystem: Subsystem,
    pub fields: Vec<Field>,
    pub status: AnalysisStatus,
    pub indicator: Signal,
    pub alert: AlertBox,
}

impl SubsystemCard {
    /// Build the card for `subsystem` from one metrics/analysis pair.
    pub fn from_analysis(subsystem: Subsystem, metrics: &Metrics, analysis: &Analysis) -> Self {
        Self {
            subsystem,
            fields: subsystem.fields(metrics),
            status: analysis.status,
            indicator: analysis.color,
            alert: AlertBox {
                message: analysis.message.clone(),
                severity: AlertSeverity::from_status(analysis.status),
            },
        }
    }
}

/// Format a reading as the backend sent it (`80` stays `80`, `0.5` stays `0.5`).
pub fn format_reading(value: f64) -> String {
    value.to_string()
}

/// Rounded usage percentage, or `None` when there is no capacity.
pub fn usage_percent(in_use: f64, total: f64) -> Option<i64> {
    if total == 0.0 {
        return None;
    }
    Some((in_use / total * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;

    fn analysis(status: AnalysisStatus, color: Signal, message: &str) -> Analysis {
        Analysis {
            status,
            color,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_oxygen_card_fields() {
        let card = SubsystemCard::from_analysis(
            Subsystem::Oxygen,
            &fixtures::metrics(),
            &fixtures::normal("Oxygen levels stable."),
        );

        let values: Vec<&str> = card.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["80", "5", "5"]);
        assert_eq!(card.indicator, Signal::Green);
        assert_eq!(card.alert.message, "Oxygen levels stable.");
        assert_eq!(card.alert.severity, None);
    }

    #[test]
    fn test_alert_severity_mapping() {
        let m = fixtures::metrics();

        let warn = SubsystemCard::from_analysis(
            Subsystem::Beds,
            &m,
            &analysis(AnalysisStatus::Warning, Signal::Yellow, "Beds will run out soon"),
        );
        assert_eq!(warn.alert.severity, Some(AlertSeverity::Warning));

        let crit = SubsystemCard::from_analysis(
            Subsystem::Beds,
            &m,
            &analysis(AnalysisStatus::Critical, Signal::Red, "ICU near collapse"),
        );
        assert_eq!(crit.alert.severity, Some(AlertSeverity::Critical));
        assert_eq!(crit.indicator, Signal::Red);
    }

    #[test]
    fn test_card_does_not_keep_previous_severity() {
        let m = fixtures::metrics();
        let mut card = SubsystemCard::from_analysis(
            Subsystem::Staff,
            &m,
            &analysis(AnalysisStatus::Warning, Signal::Yellow, "Staff shortage predicted"),
        );
        assert!(card.alert.severity.is_some());

        card = SubsystemCard::from_analysis(
            Subsystem::Staff,
            &m,
            &fixtures::normal("Staffing levels adequate."),
        );
        assert_eq!(card.alert.severity, None);
        assert_eq!(card.indicator, Signal::Green);
    }

    #[test]
    fn test_ventilator_usage_percent() {
        let mut m = fixtures::metrics();
        m.ventilators_in_use = 19.0;
        m.total_ventilators = 20.0;
        let card = SubsystemCard::from_analysis(
            Subsystem::Ventilators,
            &m,
            &fixtures::normal("ok"),
        );
        assert_eq!(card.fields[2].value, "95");

        assert_eq!(usage_percent(1.0, 3.0), Some(33));
        assert_eq!(usage_percent(2.0, 3.0), Some(67));
        assert_eq!(usage_percent(4.0, 0.0), None);
    }

    #[test]
    fn test_format_reading_is_verbatim() {
        assert_eq!(format_reading(80.0), "80");
        assert_eq!(format_reading(0.5), "0.5");
        assert_eq!(format_reading(-3.0), "-3");
    }
}
