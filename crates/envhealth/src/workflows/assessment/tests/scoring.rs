use super::common::*;

use crate::workflows::assessment::domain::{
    AirQualityData, Comparison, Domain, DomainResult, HealthOutcomesData, NaturalHazardsData,
};
use crate::workflows::assessment::{CategoryScorer, ScoreColor, ScoringConfig};

fn score_of(scorer: &CategoryScorer, result: DomainResult<'_>) -> Option<u8> {
    scorer.score(result).map(|category| category.score)
}

#[test]
fn air_score_is_inverse_of_aqi_and_never_increases() {
    let scorer = CategoryScorer::default();
    let mut previous = u8::MAX;
    for aqi in 0..=500 {
        let data = air_quality(aqi);
        let score = score_of(&scorer, DomainResult::AirQuality(&data)).expect("aqi present");
        let expected = (100 - aqi).clamp(0, 100) as u8;
        assert_eq!(score, expected, "aqi {aqi}");
        assert!(score <= previous);
        previous = score;
    }
}

#[test]
fn missing_aqi_excludes_air_quality() {
    let scorer = CategoryScorer::default();
    let data = AirQualityData::unavailable();
    assert_eq!(score_of(&scorer, DomainResult::AirQuality(&data)), None);
}

#[test]
fn water_score_penalizes_each_violation() {
    let scorer = CategoryScorer::default();
    for (count, expected) in [(0, 100), (1, 95), (2, 90), (20, 0), (30, 0)] {
        let data = water_safety(count, false);
        assert_eq!(
            score_of(&scorer, DomainResult::WaterSafety(&data)),
            Some(expected),
            "violations {count}"
        );
    }
}

#[test]
fn toxic_score_penalizes_each_facility() {
    let scorer = CategoryScorer::default();
    for (count, expected) in [(0, 100), (1, 92), (12, 4), (13, 0), (40, 0)] {
        let data = toxic_sites(count);
        assert_eq!(
            score_of(&scorer, DomainResult::ToxicSites(&data)),
            Some(expected),
            "facilities {count}"
        );
    }
}

#[test]
fn hazard_score_counts_only_high_risk_ratings() {
    let scorer = CategoryScorer::default();
    let cases: [(&[&str], u8); 4] = [
        (&["Relatively Low", "Very Low"], 100),
        (&["Very High", "Relatively Moderate"], 85),
        (&["Very High", "Relatively High", "Very High"], 55),
        (&["Very High"; 5], 25),
    ];
    for (ratings, expected) in cases {
        let data = natural_hazards(ratings);
        assert_eq!(
            score_of(&scorer, DomainResult::NaturalHazards(&data)),
            Some(expected)
        );
    }
}

#[test]
fn hazard_score_clamps_at_zero() {
    let scorer = CategoryScorer::default();
    let mut data = natural_hazards(&["Very High"]);
    let template = data.hazards[0].clone();
    data.hazards = vec![template; 7];
    assert_eq!(
        score_of(&scorer, DomainResult::NaturalHazards(&data)),
        Some(0)
    );
}

#[test]
fn empty_hazards_are_excluded() {
    let scorer = CategoryScorer::default();
    let data = NaturalHazardsData::unavailable("Henrico County", "VA");
    assert_eq!(data.county, "Henrico");
    assert_eq!(score_of(&scorer, DomainResult::NaturalHazards(&data)), None);
}

#[test]
fn health_score_weights_share_above_average() {
    let scorer = CategoryScorer::default();
    let data = health_outcomes(2, 10);
    assert_eq!(
        score_of(&scorer, DomainResult::HealthOutcomes(&data)),
        Some(84)
    );

    let all_above = health_outcomes(4, 4);
    assert_eq!(
        score_of(&scorer, DomainResult::HealthOutcomes(&all_above)),
        Some(20)
    );
}

#[test]
fn health_score_ignores_unknown_comparisons() {
    let scorer = CategoryScorer::default();
    let mut data = health_outcomes(1, 2);
    data.measures
        .push(measure("Binge Drinking", "Risk Behavior", Comparison::Unknown));
    // 1 of 2 comparable: round(100 * (1 - 0.5 * 0.8)) = 60
    assert_eq!(
        score_of(&scorer, DomainResult::HealthOutcomes(&data)),
        Some(60)
    );
}

#[test]
fn health_with_nothing_comparable_is_excluded() {
    let scorer = CategoryScorer::default();
    let mut data = HealthOutcomesData::unavailable();
    assert_eq!(score_of(&scorer, DomainResult::HealthOutcomes(&data)), None);

    data.measures
        .push(measure("Binge Drinking", "Risk Behavior", Comparison::Unknown));
    assert_eq!(score_of(&scorer, DomainResult::HealthOutcomes(&data)), None);
}

#[test]
fn category_metadata_follows_score() {
    let scorer = CategoryScorer::default();
    let data = air_quality(42);
    let category = scorer
        .score(DomainResult::AirQuality(&data))
        .expect("scored");
    assert_eq!(category.domain, Domain::AirQuality);
    assert_eq!(category.name, "Air Quality");
    assert_eq!(category.score, 58);
    assert_eq!(category.color, ScoreColor::Yellow);
    assert_eq!(category.detail, "Moderate concerns; sensitive groups should take care");
}

#[test]
fn color_bands_are_inclusive_from_above() {
    assert_eq!(ScoreColor::from_score(80), ScoreColor::Green);
    assert_eq!(ScoreColor::from_score(79), ScoreColor::Blue);
    assert_eq!(ScoreColor::from_score(60), ScoreColor::Blue);
    assert_eq!(ScoreColor::from_score(59), ScoreColor::Yellow);
    assert_eq!(ScoreColor::from_score(40), ScoreColor::Yellow);
    assert_eq!(ScoreColor::from_score(39), ScoreColor::Red);
}

#[test]
fn custom_penalties_are_honored() {
    let config = ScoringConfig {
        water_violation_penalty: 10,
        ..ScoringConfig::standard()
    };
    let scorer = CategoryScorer::new(config);
    let data = water_safety(3, false);
    assert_eq!(score_of(&scorer, DomainResult::WaterSafety(&data)), Some(70));
}
