use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::domain::{
    AirPollutant, AirQualityData, Comparison, HazardRisk, HealthMeasure, HealthOutcomesData,
    Location, NaturalHazardsData, ToxicFacility, ToxicSitesData, WaterSafetyData, WaterViolation,
};
use crate::workflows::assessment::sources::{EnvironmentalSources, SourceError};
use crate::workflows::assessment::{ReferenceTables, ReportAssembler, ScoringConfig};

/// Canned adapter responses; `None` makes that adapter fail.
#[derive(Clone, Default)]
pub(super) struct StubSources {
    pub air: Option<AirQualityData>,
    pub water: Option<WaterSafetyData>,
    pub toxic: Option<ToxicSitesData>,
    pub health: Option<HealthOutcomesData>,
    pub hazards: Option<NaturalHazardsData>,
    pub calls: Arc<AtomicUsize>,
}

impl StubSources {
    /// The reference scenario: AQI 42, two violations, no facilities,
    /// 2 of 10 measures above average, one high-risk hazard.
    pub fn scenario() -> Self {
        Self {
            air: Some(air_quality(42)),
            water: Some(water_safety(2, false)),
            toxic: Some(toxic_sites(0)),
            health: Some(health_outcomes(2, 10)),
            hazards: Some(natural_hazards(&["Very High", "Relatively Low", "Very Low"])),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T: Clone>(&self, canned: &Option<T>) -> Result<T, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned.clone().ok_or(SourceError::NoData { feed: "stub" })
    }
}

#[async_trait]
impl EnvironmentalSources for StubSources {
    async fn air_quality(&self, _zip: &str) -> Result<AirQualityData, SourceError> {
        self.answer(&self.air)
    }

    async fn water_violations(&self, _zip: &str) -> Result<WaterSafetyData, SourceError> {
        self.answer(&self.water)
    }

    async fn toxic_releases(&self, _zip: &str) -> Result<ToxicSitesData, SourceError> {
        self.answer(&self.toxic)
    }

    async fn health_outcomes(&self, _zip: &str) -> Result<HealthOutcomesData, SourceError> {
        self.answer(&self.health)
    }

    async fn natural_hazards(
        &self,
        _county: &str,
        _state_code: &str,
        _coordinates: Option<(f64, f64)>,
    ) -> Result<NaturalHazardsData, SourceError> {
        self.answer(&self.hazards)
    }
}

pub(super) fn assembler(sources: StubSources) -> ReportAssembler<StubSources> {
    assembler_with(sources, ScoringConfig::standard())
}

pub(super) fn assembler_with(
    sources: StubSources,
    scoring: ScoringConfig,
) -> ReportAssembler<StubSources> {
    ReportAssembler::new(
        Arc::new(sources),
        Arc::new(ReferenceTables::standard()),
        scoring,
    )
}

pub(super) fn location() -> Location {
    Location {
        address: "900 E Broad St".to_string(),
        zip: "23219".to_string(),
        lat: 37.5407,
        lng: -77.4360,
        county: "Richmond City County".to_string(),
        state: "Virginia".to_string(),
        state_code: "VA".to_string(),
        city: "Richmond".to_string(),
    }
}

pub(super) fn air_quality(aqi: i32) -> AirQualityData {
    AirQualityData {
        aqi: Some(aqi),
        category: "Good".to_string(),
        pollutants: vec![AirPollutant {
            name: "PM2.5".to_string(),
            aqi,
            category: "Good".to_string(),
            concentration: 0.0,
            unit: "µg/m³".to_string(),
        }],
        reporting_area: "Richmond".to_string(),
        state_code: "VA".to_string(),
        date_observed: "2025-06-01".to_string(),
    }
}

pub(super) fn water_safety(count: u32, health_based: bool) -> WaterSafetyData {
    let violations = (0..count)
        .map(|index| WaterViolation {
            contaminant_name: if index == 0 {
                "Lead".to_string()
            } else {
                "No contaminant (reporting violation)".to_string()
            },
            violation_type: "Monitoring & Reporting".to_string(),
            compliance_period: "2024-01-01".to_string(),
            pws_name: "Richmond City".to_string(),
            enforcement_action: health_based.then(|| WaterViolation::HEALTH_BASED.to_string()),
        })
        .collect();

    WaterSafetyData {
        total_violations: count,
        violations,
        summary: format!("Found {count} violation(s) across 1 water system(s)."),
    }
}

pub(super) fn toxic_sites(count: u32) -> ToxicSitesData {
    let facilities = (0..count)
        .map(|index| ToxicFacility {
            facility_name: format!("Facility {index}"),
            street_address: String::new(),
            city: "Richmond".to_string(),
            state: "VA".to_string(),
            zip: "23219".to_string(),
            industry: "Chemicals".to_string(),
            latitude: None,
            longitude: None,
        })
        .collect();

    ToxicSitesData {
        total_facilities: count,
        facilities,
        summary: String::new(),
    }
}

/// `above` measures above the national average out of `total` comparable ones.
pub(super) fn health_outcomes(above: usize, total: usize) -> HealthOutcomesData {
    let measures = (0..total)
        .map(|index| {
            let comparison = if index < above {
                Comparison::Above
            } else {
                Comparison::Below
            };
            measure(&format!("Measure {index}"), "Chronic Disease", comparison)
        })
        .collect();

    HealthOutcomesData {
        measures,
        data_year: "2023".to_string(),
        source: HealthOutcomesData::SOURCE.to_string(),
    }
}

pub(super) fn measure(name: &str, category: &str, comparison: Comparison) -> HealthMeasure {
    HealthMeasure {
        category: category.to_string(),
        measure_name: name.to_string(),
        short_name: name.to_string(),
        data_value: 10.0,
        national_avg: (comparison != Comparison::Unknown).then_some(9.0),
        unit: "%".to_string(),
        comparison,
    }
}

pub(super) fn natural_hazards(ratings: &[&str]) -> NaturalHazardsData {
    const NAMES: [&str; 5] = ["Hurricane", "Tornado", "Riverine Flooding", "Heat Wave", "Hail"];
    let hazards = ratings
        .iter()
        .zip(NAMES)
        .enumerate()
        .map(|(index, (rating, name))| HazardRisk {
            name: name.to_string(),
            risk_score: Some(90.0 - index as f64 * 10.0),
            risk_rating: (*rating).to_string(),
            icon: String::new(),
        })
        .collect();

    NaturalHazardsData {
        overall_risk_score: Some(70.0),
        overall_risk_rating: "Relatively High".to_string(),
        hazards,
        county: "Richmond City".to_string(),
        state: "VA".to_string(),
    }
}

pub(super) async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
