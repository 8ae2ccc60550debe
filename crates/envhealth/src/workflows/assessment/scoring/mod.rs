mod composite;
mod config;
mod rules;

pub use composite::{Grade, OverallScore};
pub use config::ScoringConfig;

use super::domain::{Domain, DomainResult, DomainResults};
use serde::Serialize;

/// Display bucket derived purely from a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Blue,
    Yellow,
    Red,
}

impl ScoreColor {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Green
        } else if score >= 60 {
            Self::Blue
        } else if score >= 40 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub const fn status_label(self) -> &'static str {
        match self {
            Self::Green => "Good",
            Self::Blue => "Fair",
            Self::Yellow => "Poor",
            Self::Red => "Critical",
        }
    }
}

/// One domain's normalized 0-100 score (100 = best).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    #[serde(skip)]
    pub domain: Domain,
    pub name: &'static str,
    pub score: u8,
    pub icon: &'static str,
    pub color: ScoreColor,
    pub detail: &'static str,
}

impl CategoryScore {
    fn new(domain: Domain, score: u8) -> Self {
        Self {
            domain,
            name: domain.label(),
            score,
            icon: domain.icon(),
            color: ScoreColor::from_score(score),
            detail: rules::detail(domain, score),
        }
    }
}

/// Stateless scorer applying the rubric to domain results.
#[derive(Debug, Clone, Default)]
pub struct CategoryScorer {
    config: ScoringConfig,
}

impl CategoryScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one domain, or `None` when the domain has nothing to contribute.
    pub fn score(&self, result: DomainResult<'_>) -> Option<CategoryScore> {
        let score = match result {
            DomainResult::AirQuality(data) => rules::air_score(data),
            DomainResult::WaterSafety(data) => Some(rules::water_score(data, &self.config)),
            DomainResult::ToxicSites(data) => Some(rules::toxic_score(data, &self.config)),
            DomainResult::HealthOutcomes(data) => rules::health_score(data, &self.config),
            DomainResult::NaturalHazards(data) => rules::hazard_score(data, &self.config),
        }?;

        Some(CategoryScore::new(result.domain(), score))
    }

    /// Scores every domain in report order, honoring `exclude_unavailable`.
    pub fn score_all(&self, results: &DomainResults) -> Vec<CategoryScore> {
        results
            .iter()
            .filter(|result| {
                !(self.config.exclude_unavailable && results.is_unavailable(result.domain()))
            })
            .filter_map(|result| self.score(result))
            .collect()
    }

    pub fn aggregate(&self, category_scores: Vec<CategoryScore>) -> OverallScore {
        composite::aggregate(category_scores, &self.config)
    }

    pub fn evaluate(&self, results: &DomainResults) -> OverallScore {
        self.aggregate(self.score_all(results))
    }
}
