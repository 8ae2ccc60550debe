use super::config::ScoringConfig;
use super::CategoryScore;
use serde::Serialize;

/// Letter grade for the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Thresholds are inclusive from above; the first match wins.
    pub const fn from_score(score: u8) -> Self {
        if score >= 90 {
            Self::A
        } else if score >= 80 {
            Self::BPlus
        } else if score >= 70 {
            Self::B
        } else if score >= 60 {
            Self::CPlus
        } else if score >= 50 {
            Self::C
        } else if score >= 40 {
            Self::D
        } else {
            Self::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub grade: Grade,
    pub score: u8,
    pub summary: String,
    pub category_scores: Vec<CategoryScore>,
}

pub(crate) fn aggregate(category_scores: Vec<CategoryScore>, config: &ScoringConfig) -> OverallScore {
    let composite = composite_score(&category_scores, config.neutral_score);

    let factors: Vec<&'static str> = category_scores
        .iter()
        .filter(|category| category.score < config.concern_threshold)
        .map(|category| category.domain.concern_phrase())
        .collect();

    OverallScore {
        grade: Grade::from_score(composite),
        score: composite,
        summary: summarize(composite, &factors),
        category_scores,
    }
}

fn composite_score(category_scores: &[CategoryScore], neutral: u8) -> u8 {
    if category_scores.is_empty() {
        return neutral;
    }

    let total: u32 = category_scores
        .iter()
        .map(|category| u32::from(category.score))
        .sum();
    let mean = f64::from(total) / category_scores.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

fn summarize(composite: u8, factors: &[&str]) -> String {
    if composite >= 80 {
        "This location has excellent environmental health indicators.".to_string()
    } else if composite >= 60 {
        "This location has generally good environmental health, with some areas to monitor."
            .to_string()
    } else if composite >= 40 {
        if factors.is_empty() {
            "This location has moderate environmental health concerns.".to_string()
        } else {
            format!(
                "This location has moderate environmental health concerns, including {}.",
                factors.join(" and ")
            )
        }
    } else if factors.is_empty() {
        "This location has significant environmental health concerns.".to_string()
    } else {
        format!(
            "This location has significant environmental health concerns: {}.",
            factors.join(", ")
        )
    }
}
