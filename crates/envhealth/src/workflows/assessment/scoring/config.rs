use serde::{Deserialize, Serialize};

/// Numeric rubric for category scoring and composite aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub water_violation_penalty: u32,
    pub toxic_facility_penalty: u32,
    pub high_risk_hazard_penalty: u32,
    pub health_above_weight: f64,
    pub high_risk_ratings: Vec<String>,
    /// Categories scoring below this are named in the summary.
    pub concern_threshold: u8,
    /// Composite used when no category produced a score.
    pub neutral_score: u8,
    /// Drop domains whose adapter failed instead of scoring their defaults.
    pub exclude_unavailable: bool,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            water_violation_penalty: 5,
            toxic_facility_penalty: 8,
            high_risk_hazard_penalty: 15,
            health_above_weight: 0.8,
            high_risk_ratings: vec!["Very High".to_string(), "Relatively High".to_string()],
            concern_threshold: 50,
            neutral_score: 50,
            exclude_unavailable: false,
        }
    }

    pub fn is_high_risk(&self, rating: &str) -> bool {
        self.high_risk_ratings.iter().any(|high| high == rating)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
