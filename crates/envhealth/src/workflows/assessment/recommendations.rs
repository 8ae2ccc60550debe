//! Actionable guidance derived from a report's domain results.

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{
    AirQualityData, Comparison, Domain, DomainResults, HealthOutcomesData, NaturalHazardsData,
    ToxicSitesData, WaterSafetyData,
};
use super::reference::ReferenceTables;
use super::scoring::ScoringConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Recommended",
            Self::Low => "Good to Know",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub actions: Vec<String>,
}

impl Recommendation {
    fn new(
        category: &str,
        icon: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        actions: Vec<String>,
    ) -> Self {
        Self {
            category: category.to_string(),
            icon: icon.to_string(),
            title: title.into(),
            description: description.into(),
            priority,
            actions,
        }
    }
}

/// Builds recommendations for every domain with something worth acting on,
/// highest priority first.
pub fn generate_recommendations(
    results: &DomainResults,
    tables: &ReferenceTables,
    scoring: &ScoringConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    air_recommendations(&results.air_quality, &mut recommendations);
    recommendations.extend(water_recommendation(&results.water_safety));
    recommendations.extend(toxic_recommendation(&results.toxic_sites));
    recommendations.extend(health_recommendation(&results.health_outcomes));
    recommendations.extend(hazard_recommendation(
        &results.natural_hazards,
        tables,
        scoring,
    ));

    // Stable, so domain order is kept within a priority.
    recommendations.sort_by_key(|recommendation| recommendation.priority);
    recommendations
}

fn actions(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn air_recommendations(data: &AirQualityData, out: &mut Vec<Recommendation>) {
    let Some(aqi) = data.aqi else {
        return;
    };
    let label = Domain::AirQuality.label();
    let icon = Domain::AirQuality.icon();

    if aqi > 100 {
        let severe = aqi > 150;
        let audience = if severe {
            "This level poses health risks for everyone, not just sensitive groups."
        } else {
            "Sensitive groups including children, elderly, and those with respiratory conditions should take extra care."
        };
        let mut steps = actions(&[
            "Use a HEPA air purifier indoors, especially in bedrooms",
            "Check AirNow.gov daily before outdoor activities",
            "Exercise outdoors in the early morning when AQI tends to be lower",
            "Keep windows closed on high-AQI days",
        ]);
        steps.push(
            if severe {
                "Consider an N95 mask for outdoor activities"
            } else {
                "Limit prolonged outdoor exertion during peak hours (midday to evening)"
            }
            .to_string(),
        );
        out.push(Recommendation::new(
            label,
            icon,
            "Protect Yourself from Poor Air Quality",
            format!("With an AQI of {aqi}, the air quality needs attention. {audience}"),
            if severe { Priority::High } else { Priority::Medium },
            steps,
        ));
    } else if aqi > 50 {
        out.push(Recommendation::new(
            label,
            icon,
            "Monitor Air Quality",
            "Air quality is generally acceptable but occasionally reaches moderate levels. Stay informed to protect yourself on bad days.",
            Priority::Low,
            actions(&[
                "Bookmark AirNow.gov for your ZIP code",
                "If you have asthma or heart disease, keep medication accessible",
                "On moderate days, exercise early morning when ozone is typically lower",
            ]),
        ));
    }

    let ozone = data.pollutants.iter().find(|pollutant| {
        pollutant.aqi > 50 && (pollutant.name == "O3" || pollutant.name.contains("Ozone"))
    });
    if let Some(ozone) = ozone {
        out.push(Recommendation::new(
            label,
            "☀️",
            "Ozone Alert",
            "Ground-level ozone is elevated. Ozone levels peak on hot, sunny afternoons.",
            if ozone.aqi > 100 {
                Priority::Medium
            } else {
                Priority::Low
            },
            actions(&[
                "Schedule outdoor exercise for early morning (before 10 AM)",
                "Ozone levels drop significantly in the evening and overnight",
                "Children should avoid heavy outdoor play during afternoon hours",
            ]),
        ));
    }
}

fn water_recommendation(data: &WaterSafetyData) -> Option<Recommendation> {
    if data.total_violations == 0 {
        return None;
    }

    let health_based = data
        .violations
        .iter()
        .any(|violation| violation.is_health_based());
    let exceeds_mcl = data.violations.iter().any(|violation| {
        violation.violation_type == "Max Contaminant Level" || violation.violation_type == "MCL"
    });

    let mut contaminants: Vec<&str> = Vec::new();
    for violation in &data.violations {
        let name = violation.contaminant_name.as_str();
        if !name.contains("No contaminant") && !contaminants.contains(&name) {
            contaminants.push(name);
        }
    }
    let involves = |needle: &str| {
        let needle = needle.to_ascii_lowercase();
        contaminants
            .iter()
            .any(|name| name.to_ascii_lowercase().contains(&needle))
    };

    let mut steps = Vec::new();
    if involves("lead") {
        steps.push("Install an NSF-certified lead-reduction filter (look for NSF/ANSI 53 certification)");
        steps.push("Run cold water for 30 seconds before drinking if pipes have been idle");
    }
    if involves("tthm") || involves("trihalomethane") {
        steps.push("A carbon block filter effectively reduces disinfection byproducts like TTHMs");
    }
    if involves("coliform") || involves("e. coli") {
        steps.push("Consider a UV water purifier and follow boil-water advisories from your utility");
    }
    if involves("nitrate") {
        steps.push("Use reverse osmosis filtration for nitrate removal; standard carbon filters don't remove nitrates");
        steps.push("Do NOT boil water to remove nitrates; boiling concentrates them");
    }
    if steps.is_empty() {
        steps.push("Consider a multi-stage water filter (reverse osmosis or carbon block) for extra protection");
    }
    steps.push("Request your water utility's annual Consumer Confidence Report (CCR)");
    steps.push("Consider a home water test kit to check your specific tap water");

    let mut description = format!("{} violation(s) found", data.total_violations);
    if !contaminants.is_empty() {
        let listed: Vec<&str> = contaminants.iter().take(3).copied().collect();
        description.push_str(&format!(" involving {}", listed.join(", ")));
    }
    description.push_str(if exceeds_mcl {
        ". Some exceed maximum contaminant levels, which means action is recommended."
    } else {
        ". Most are monitoring/reporting issues, but staying informed is wise."
    });

    Some(Recommendation::new(
        Domain::WaterSafety.label(),
        Domain::WaterSafety.icon(),
        if health_based {
            "Address Water Quality Concerns"
        } else {
            "Monitor Your Water Quality"
        },
        description,
        if health_based || exceeds_mcl {
            Priority::High
        } else {
            Priority::Medium
        },
        actions(&steps),
    ))
}

fn toxic_recommendation(data: &ToxicSitesData) -> Option<Recommendation> {
    let total = data.total_facilities;
    if total == 0 {
        return None;
    }

    let mut steps = Vec::new();
    if total >= 5 {
        steps.push("Check EPA's TRI Explorer for specific chemicals released by each facility");
        steps.push("Consider a home air quality monitor to track indoor air quality");
        steps.push("If you notice unusual odors, report them to your state environmental agency");
    }
    steps.push("Review EPA Envirofacts for detailed facility information");
    steps.push("Attend public comment periods for facility permits in your area");
    if total > 2 {
        steps.push("Consider getting soil tested if you grow food in your yard");
    }

    Some(Recommendation::new(
        Domain::ToxicSites.label(),
        Domain::ToxicSites.icon(),
        format!("{total} TRI Facilities Nearby"),
        format!(
            "There are {total} facilities reporting toxic chemical releases in your ZIP code. \
             The actual health impact depends on what chemicals they release, in what quantities, and how close you are."
        ),
        if total >= 5 {
            Priority::Medium
        } else {
            Priority::Low
        },
        actions(&steps),
    ))
}

fn health_recommendation(data: &HealthOutcomesData) -> Option<Recommendation> {
    let above: Vec<_> = data
        .measures
        .iter()
        .filter(|measure| measure.comparison == Comparison::Above)
        .collect();
    if above.is_empty() {
        return None;
    }

    let categories: BTreeSet<&str> = above.iter().map(|measure| measure.category.as_str()).collect();
    let named = |needle: &str| above.iter().any(|measure| measure.measure_name.contains(needle));

    let mut steps = Vec::new();
    if categories.contains("Cardiovascular") {
        steps.push("Get regular blood pressure and cholesterol screenings; this area has elevated cardiovascular risk");
        steps.push("Favor a heart-healthy diet with less sodium and processed food");
    }
    if categories.contains("Respiratory") {
        steps.push("If you experience breathing difficulties, seek evaluation; local asthma/COPD rates are elevated");
        steps.push("Ask about pulmonary function testing, especially if you're a current or former smoker");
    }
    if categories.contains("Mental Health") {
        steps.push("Mental health screenings are important; depression rates are above average in this area");
        steps.push("SAMHSA helpline: 1-800-662-4357 (free, confidential, 24/7)");
    }
    if named("Diabetes") {
        steps.push("Get regular blood glucose testing; local diabetes rates are elevated");
        steps.push("Even 30 minutes of walking a day significantly reduces diabetes risk");
    }
    if named("Cancer") {
        steps.push("Stay up to date on cancer screenings (colonoscopy, mammogram, etc.)");
    }
    if steps.is_empty() {
        steps.push("Schedule annual wellness checkups with your primary care provider");
        steps.push("Stay up to date on recommended screenings for your age group");
    }

    Some(Recommendation::new(
        "Health",
        Domain::HealthOutcomes.icon(),
        "Health Screening Recommendations",
        format!(
            "{} health measure(s) are above the national average in this area. \
             This doesn't mean you'll be affected, but being proactive about screenings is smart.",
            above.len()
        ),
        if above.len() > 5 {
            Priority::Medium
        } else {
            Priority::Low
        },
        actions(&steps),
    ))
}

fn hazard_recommendation(
    data: &NaturalHazardsData,
    tables: &ReferenceTables,
    scoring: &ScoringConfig,
) -> Option<Recommendation> {
    let high_risk: Vec<_> = data
        .hazards
        .iter()
        .filter(|hazard| scoring.is_high_risk(&hazard.risk_rating))
        .collect();
    if high_risk.is_empty() {
        return None;
    }

    let mut steps = actions(&[
        "Build an emergency kit: 3 days of water, non-perishable food, medications, flashlight, batteries",
        "Sign up for local emergency alerts (FEMA app, local emergency management)",
    ]);
    for hazard in high_risk.iter().take(3) {
        if let Some(definition) = tables.hazard(&hazard.name) {
            steps.push(format!("**{}**: {}", hazard.name, definition.preparedness));
        }
    }
    steps.push(
        "Review your insurance coverage; standard policies often don't cover floods or earthquakes"
            .to_string(),
    );
    steps.push("Make a family communication plan for emergencies".to_string());

    let names: Vec<String> = high_risk
        .iter()
        .map(|hazard| hazard.name.to_lowercase())
        .collect();

    Some(Recommendation::new(
        Domain::NaturalHazards.label(),
        Domain::NaturalHazards.icon(),
        "Emergency Preparedness",
        format!(
            "This area has elevated risk for {}. Being prepared can make a major difference.",
            names.join(", ")
        ),
        if high_risk.len() >= 3 {
            Priority::High
        } else {
            Priority::Medium
        },
        steps,
    ))
}
