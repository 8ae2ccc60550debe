use serde::{Deserialize, Deserializer, Serialize};

/// Place being assessed. Only `zip` is required; everything else is best-effort.
/// Missing or `null` fields fall back to empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lng: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub county: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Location {
    pub fn for_zip(zip: impl Into<String>) -> Self {
        Self {
            zip: zip.into(),
            ..Self::default()
        }
    }

    pub fn has_zip(&self) -> bool {
        !self.zip.trim().is_empty()
    }

    /// Coordinates when the caller supplied them; `0,0` means "not provided".
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if self.lat == 0.0 && self.lng == 0.0 {
            None
        } else {
            Some((self.lat, self.lng))
        }
    }
}

/// The five assessed domains, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    AirQuality,
    WaterSafety,
    ToxicSites,
    HealthOutcomes,
    NaturalHazards,
}

impl Domain {
    pub const fn ordered() -> [Domain; 5] {
        [
            Self::AirQuality,
            Self::WaterSafety,
            Self::ToxicSites,
            Self::HealthOutcomes,
            Self::NaturalHazards,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AirQuality => "Air Quality",
            Self::WaterSafety => "Water Safety",
            Self::ToxicSites => "Toxic Sites",
            Self::HealthOutcomes => "Health Outcomes",
            Self::NaturalHazards => "Natural Hazards",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::AirQuality => "💨",
            Self::WaterSafety => "💧",
            Self::ToxicSites => "☢️",
            Self::HealthOutcomes => "🏥",
            Self::NaturalHazards => "🌪️",
        }
    }

    /// Short phrase used when the domain drags the composite summary down.
    pub const fn concern_phrase(self) -> &'static str {
        match self {
            Self::AirQuality => "poor air quality",
            Self::WaterSafety => "water quality violations",
            Self::ToxicSites => "nearby toxic release facilities",
            Self::HealthOutcomes => "elevated disease rates",
            Self::NaturalHazards => "high natural hazard risks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityData {
    pub aqi: Option<i32>,
    pub category: String,
    #[serde(default)]
    pub pollutants: Vec<AirPollutant>,
    #[serde(default)]
    pub reporting_area: String,
    #[serde(default)]
    pub state_code: String,
    #[serde(default)]
    pub date_observed: String,
}

impl AirQualityData {
    pub fn unavailable() -> Self {
        Self::without_reading("Data unavailable", "N/A", String::new())
    }

    pub(crate) fn without_reading(
        category: &str,
        reporting_area: &str,
        date_observed: String,
    ) -> Self {
        Self {
            aqi: None,
            category: category.to_string(),
            pollutants: Vec::new(),
            reporting_area: reporting_area.to_string(),
            state_code: String::new(),
            date_observed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirPollutant {
    pub name: String,
    pub aqi: i32,
    pub category: String,
    pub concentration: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSafetyData {
    pub total_violations: u32,
    #[serde(default)]
    pub violations: Vec<WaterViolation>,
    #[serde(default)]
    pub summary: String,
}

impl WaterSafetyData {
    pub fn unavailable() -> Self {
        Self {
            total_violations: 0,
            violations: Vec::new(),
            summary: "Water safety data temporarily unavailable.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterViolation {
    pub contaminant_name: String,
    pub violation_type: String,
    pub compliance_period: String,
    pub pws_name: String,
    pub enforcement_action: Option<String>,
}

impl WaterViolation {
    pub const HEALTH_BASED: &'static str = "Health-based violation";

    pub fn is_health_based(&self) -> bool {
        self.enforcement_action.as_deref() == Some(Self::HEALTH_BASED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicSitesData {
    pub total_facilities: u32,
    #[serde(default)]
    pub facilities: Vec<ToxicFacility>,
    #[serde(default)]
    pub summary: String,
}

impl ToxicSitesData {
    pub fn unavailable() -> Self {
        Self {
            total_facilities: 0,
            facilities: Vec::new(),
            summary: "Toxic release data temporarily unavailable.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicFacility {
    pub facility_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub industry: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOutcomesData {
    #[serde(default)]
    pub measures: Vec<HealthMeasure>,
    #[serde(default)]
    pub data_year: String,
    #[serde(default)]
    pub source: String,
}

impl HealthOutcomesData {
    pub const SOURCE: &'static str = "CDC PLACES";

    pub fn unavailable() -> Self {
        Self {
            measures: Vec::new(),
            data_year: String::new(),
            source: Self::SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMeasure {
    pub category: String,
    pub measure_name: String,
    pub short_name: String,
    pub data_value: f64,
    pub national_avg: Option<f64>,
    pub unit: String,
    pub comparison: Comparison,
}

/// Local prevalence relative to the national baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Above,
    Below,
    Average,
    Unknown,
}

impl Comparison {
    /// Values within one percentage point of the baseline count as average.
    pub fn against(value: f64, national_avg: Option<f64>) -> Self {
        match national_avg {
            None => Self::Unknown,
            Some(avg) => {
                let diff = value - avg;
                if diff.abs() < 1.0 {
                    Self::Average
                } else if diff > 0.0 {
                    Self::Above
                } else {
                    Self::Below
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalHazardsData {
    pub overall_risk_score: Option<f64>,
    pub overall_risk_rating: String,
    #[serde(default)]
    pub hazards: Vec<HazardRisk>,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: String,
}

impl NaturalHazardsData {
    pub fn unavailable(county: &str, state_code: &str) -> Self {
        Self {
            overall_risk_score: None,
            overall_risk_rating: "Data unavailable".to_string(),
            hazards: Vec::new(),
            county: clean_county(county).to_string(),
            state: state_code.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRisk {
    pub name: String,
    pub risk_score: Option<f64>,
    pub risk_rating: String,
    pub icon: String,
}

/// Strips a trailing " County" (any case) so lookups match NRI county names.
pub fn clean_county(county: &str) -> &str {
    let trimmed = county.trim();
    let suffix = " county";
    if trimmed.len() >= suffix.len() {
        let split = trimmed.len() - suffix.len();
        if trimmed.is_char_boundary(split) && trimmed[split..].eq_ignore_ascii_case(suffix) {
            return trimmed[..split].trim_end();
        }
    }
    trimmed
}

/// Borrowed view over one domain's raw result, tagged by domain.
#[derive(Debug, Clone, Copy)]
pub enum DomainResult<'a> {
    AirQuality(&'a AirQualityData),
    WaterSafety(&'a WaterSafetyData),
    ToxicSites(&'a ToxicSitesData),
    HealthOutcomes(&'a HealthOutcomesData),
    NaturalHazards(&'a NaturalHazardsData),
}

impl DomainResult<'_> {
    pub const fn domain(&self) -> Domain {
        match self {
            Self::AirQuality(_) => Domain::AirQuality,
            Self::WaterSafety(_) => Domain::WaterSafety,
            Self::ToxicSites(_) => Domain::ToxicSites,
            Self::HealthOutcomes(_) => Domain::HealthOutcomes,
            Self::NaturalHazards(_) => Domain::NaturalHazards,
        }
    }
}

/// The five settled domain results for one report, plus which adapters failed.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainResults {
    pub air_quality: AirQualityData,
    pub water_safety: WaterSafetyData,
    pub toxic_sites: ToxicSitesData,
    pub health_outcomes: HealthOutcomesData,
    pub natural_hazards: NaturalHazardsData,
    pub unavailable: Vec<Domain>,
}

impl DomainResults {
    pub fn get(&self, domain: Domain) -> DomainResult<'_> {
        match domain {
            Domain::AirQuality => DomainResult::AirQuality(&self.air_quality),
            Domain::WaterSafety => DomainResult::WaterSafety(&self.water_safety),
            Domain::ToxicSites => DomainResult::ToxicSites(&self.toxic_sites),
            Domain::HealthOutcomes => DomainResult::HealthOutcomes(&self.health_outcomes),
            Domain::NaturalHazards => DomainResult::NaturalHazards(&self.natural_hazards),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = DomainResult<'_>> + '_ {
        Domain::ordered().into_iter().map(|domain| self.get(domain))
    }

    pub fn is_unavailable(&self, domain: Domain) -> bool {
        self.unavailable.contains(&domain)
    }
}
