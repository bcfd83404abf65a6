//! Overall risk gauge.

use serde::Serialize;

/// Score above which the gauge shows HIGH RISK.
pub const HIGH_RISK_ABOVE: u8 = 60;

/// Score above which the gauge shows MEDIUM RISK.
pub const MEDIUM_RISK_ABOVE: u8 = 30;

/// Risk band derived from the backend's 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

/// Fixed color role of a band. The theme maps roles to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        if score > HIGH_RISK_ABOVE {
            RiskBand::High
        } else if score > MEDIUM_RISK_ABOVE {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW RISK",
            RiskBand::Medium => "MEDIUM RISK",
            RiskBand::High => "HIGH RISK",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            RiskBand::Low => Tone::Success,
            RiskBand::Medium => Tone::Warning,
            RiskBand::High => Tone::Danger,
        }
    }
}

/// Rendered state of the risk gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskGauge {
    pub score: u8,
    pub band: RiskBand,
}

impl RiskGauge {
    pub fn new(score: u8) -> Self {
        Self {
            score,
            band: RiskBand::from_score(score),
        }
    }

    /// Fill angle of the gauge arc: the score mapped linearly onto 360°.
    pub fn angle_degrees(&self) -> f64 {
        // 36 * s is exact; one division keeps the result the nearest f64 to s * 3.6
        f64::from(self.score) * 36.0 / 10.0
    }

    /// Filled fraction of the gauge, clamped to 0..=1.
    pub fn ratio(&self) -> f64 {
        (f64::from(self.score) / 100.0).clamp(0.0, 1.0)
    }

    /// Text shown inside the gauge, e.g. `75%`.
    pub fn score_text(&self) -> String {
        format!("{}%", self.score)
    }
}
