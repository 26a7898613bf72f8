//! Prediction result records and their fixed degraded-mode values.

use serde::{Deserialize, Serialize};

/// Crowd level reported by the model.
///
/// The model is asked for Low/Medium/High but the value is not validated:
/// anything else is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrowdLevel {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

/// Crowd prediction for one campus module at a given day and time.
/// Fields are taken as parsed; no range clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub crowd_level: CrowdLevel,
    pub estimated_wait_minutes: f64,
    /// 0.0 – 1.0 as requested from the model
    pub confidence: f64,
    pub reasoning: String,
}

pub const NOT_CONFIGURED_REASONING: &str =
    "API key not configured. Using default prediction based on typical weekday patterns.";
pub const FALLBACK_REASONING: &str = "Based on typical weekday patterns.";

/// Items returned by the demand forecast whenever the model can't be used.
pub const DEFAULT_DEMAND_ITEMS: [&str; 5] = [
    "South Indian Thali",
    "Hyderabadi Biryani",
    "Butter Masala Dosa",
    "Filtered Coffee",
    "Fresh Fruit Bowl",
];

impl PredictionResult {
    fn typical_weekday(reasoning: &str) -> Self {
        Self {
            crowd_level: CrowdLevel::Medium,
            estimated_wait_minutes: 15.0,
            confidence: 0.5,
            reasoning: reasoning.to_string(),
        }
    }

    /// Returned when no API key is configured.
    pub fn not_configured() -> Self {
        Self::typical_weekday(NOT_CONFIGURED_REASONING)
    }

    /// Returned when the model call or its parsing fails.
    pub fn fallback() -> Self {
        Self::typical_weekday(FALLBACK_REASONING)
    }
}

pub fn default_demand_items() -> Vec<String> {
    DEFAULT_DEMAND_ITEMS.iter().map(|s| s.to_string()).collect()
}
