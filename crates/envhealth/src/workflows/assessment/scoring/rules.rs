use super::super::domain::{
    AirQualityData, Comparison, Domain, HealthOutcomesData, NaturalHazardsData, ToxicSitesData,
    WaterSafetyData,
};
use super::config::ScoringConfig;
use super::ScoreColor;

pub(crate) fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

fn penalized(count: u32, penalty: u32) -> u8 {
    clamp_score(100 - i64::from(count) * i64::from(penalty))
}

/// `None` when no AQI reading was available.
pub(crate) fn air_score(data: &AirQualityData) -> Option<u8> {
    data.aqi.map(|aqi| clamp_score(100 - i64::from(aqi)))
}

pub(crate) fn water_score(data: &WaterSafetyData, config: &ScoringConfig) -> u8 {
    penalized(data.total_violations, config.water_violation_penalty)
}

pub(crate) fn toxic_score(data: &ToxicSitesData, config: &ScoringConfig) -> u8 {
    penalized(data.total_facilities, config.toxic_facility_penalty)
}

/// `None` when no measure has a national baseline to compare against.
pub(crate) fn health_score(data: &HealthOutcomesData, config: &ScoringConfig) -> Option<u8> {
    let comparable = data
        .measures
        .iter()
        .filter(|measure| measure.comparison != Comparison::Unknown)
        .count();
    if comparable == 0 {
        return None;
    }

    let above = data
        .measures
        .iter()
        .filter(|measure| measure.comparison == Comparison::Above)
        .count();
    let above_ratio = above as f64 / comparable as f64;
    let raw = (100.0 * (1.0 - above_ratio * config.health_above_weight)).round();
    Some(clamp_score(raw as i64))
}

/// `None` when the county has no hazard data.
pub(crate) fn hazard_score(data: &NaturalHazardsData, config: &ScoringConfig) -> Option<u8> {
    if data.hazards.is_empty() {
        return None;
    }

    let high_risk = data
        .hazards
        .iter()
        .filter(|hazard| config.is_high_risk(&hazard.risk_rating))
        .count();
    let high_risk = u32::try_from(high_risk).unwrap_or(u32::MAX);
    Some(penalized(high_risk, config.high_risk_hazard_penalty))
}

pub(crate) fn detail(domain: Domain, score: u8) -> &'static str {
    let tier = ScoreColor::from_score(score);
    match (domain, tier) {
        (Domain::AirQuality, ScoreColor::Green) => "Excellent air quality with minimal pollution",
        (Domain::AirQuality, ScoreColor::Blue) => {
            "Acceptable air quality, some pollutants present"
        }
        (Domain::AirQuality, ScoreColor::Yellow) => {
            "Moderate concerns; sensitive groups should take care"
        }
        (Domain::AirQuality, ScoreColor::Red) => "Poor air quality with significant health risk",

        (Domain::WaterSafety, ScoreColor::Green) => "Clean record with minimal or no violations",
        (Domain::WaterSafety, ScoreColor::Blue) => "Some violations found; monitor water quality",
        (Domain::WaterSafety, ScoreColor::Yellow) => "Multiple violations; consider water testing",
        (Domain::WaterSafety, ScoreColor::Red) => {
            "Significant violations; water filtration recommended"
        }

        (Domain::ToxicSites, ScoreColor::Green) => {
            "Very few or no toxic release facilities nearby"
        }
        (Domain::ToxicSites, ScoreColor::Blue) => "Some TRI facilities in the area",
        (Domain::ToxicSites, ScoreColor::Yellow) => "Several toxic release facilities nearby",
        (Domain::ToxicSites, ScoreColor::Red) => "High density of toxic release facilities",

        (Domain::HealthOutcomes, ScoreColor::Green) => "Community health indicators are strong",
        (Domain::HealthOutcomes, ScoreColor::Blue) => {
            "Some health metrics above national averages"
        }
        (Domain::HealthOutcomes, ScoreColor::Yellow) => {
            "Multiple health concerns above national averages"
        }
        (Domain::HealthOutcomes, ScoreColor::Red) => {
            "Significant health disparities compared to national averages"
        }

        (Domain::NaturalHazards, ScoreColor::Green) => "Minimal natural hazard exposure",
        (Domain::NaturalHazards, ScoreColor::Blue) => "Some natural hazard risks to be aware of",
        (Domain::NaturalHazards, ScoreColor::Yellow) => {
            "Notable natural hazard risks; preparedness recommended"
        }
        (Domain::NaturalHazards, ScoreColor::Red) => {
            "High natural hazard exposure; emergency preparedness essential"
        }
    }
}
