//! Recommendation list.

use serde::Serialize;

use crate::api::{Priority, Recommendation};

/// Visual weight given to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Emphasized,
    Moderate,
    Default,
}

impl From<Priority> for Emphasis {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => Emphasis::Emphasized,
            Priority::Medium => Emphasis::Moderate,
            Priority::Low => Emphasis::Default,
        }
    }
}

/// One rendered entry in the recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationItem {
    pub message: String,
    pub priority: Priority,
    pub action: String,
    pub emphasis: Emphasis,
}

impl From<&Recommendation> for RecommendationItem {
    fn from(rec: &Recommendation) -> Self {
        Self {
            message: rec.message.clone(),
            priority: rec.priority,
            action: rec.action.clone(),
            emphasis: rec.priority.into(),
        }
    }
}

/// Render the whole list, one item per recommendation, in input order.
pub fn render_list(recs: &[Recommendation]) -> Vec<RecommendationItem> {
    recs.iter().map(RecommendationItem::from).collect()
}
