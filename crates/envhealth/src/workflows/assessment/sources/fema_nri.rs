//! FEMA National Risk Index county features from the ArcGIS feature service.

use serde_json::Value;

use super::{get_json, number, text, SourceError};
use crate::workflows::assessment::domain::{clean_county, HazardRisk, NaturalHazardsData};
use crate::workflows::assessment::reference::ReferenceTables;

const FEED: &str = "FEMA NRI";
const QUERY_URL: &str = "https://services.arcgis.com/XG15cJAlne2vxtgt/arcgis/rest/services/National_Risk_Index_Counties/FeatureServer/0/query";

/// How a county feature is located.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CountyQuery {
    ByName { state_code: String, county: String },
    ByPoint { lat: f64, lng: f64 },
}

impl CountyQuery {
    /// Prefers the named county; coordinates are only used when it is missing.
    pub(crate) fn resolve(
        county: &str,
        state_code: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Option<Self> {
        let county = clean_county(county);
        let state_code = state_code.trim();
        if !county.is_empty() && !state_code.is_empty() {
            return Some(Self::ByName {
                state_code: state_code.to_ascii_uppercase(),
                county: county.to_string(),
            });
        }
        coordinates.map(|(lat, lng)| Self::ByPoint { lat, lng })
    }

    fn params(&self, out_fields: String) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("outFields", out_fields),
            ("returnGeometry", "false".to_string()),
            ("f", "json".to_string()),
        ];
        match self {
            Self::ByName { state_code, county } => {
                params.push((
                    "where",
                    format!(
                        "STATEABBRV='{}' AND COUNTY LIKE '%{}%'",
                        escape_literal(state_code),
                        escape_literal(county)
                    ),
                ));
            }
            Self::ByPoint { lat, lng } => {
                params.push(("geometry", format!("{lng},{lat}")));
                params.push(("geometryType", "esriGeometryPoint".to_string()));
                params.push(("inSR", "4326".to_string()));
                params.push(("spatialRel", "esriSpatialRelIntersects".to_string()));
            }
        }
        params
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    tables: &ReferenceTables,
    county: &str,
    state_code: &str,
    coordinates: Option<(f64, f64)>,
) -> Result<NaturalHazardsData, SourceError> {
    let query = CountyQuery::resolve(county, state_code, coordinates)
        .ok_or(SourceError::NoData { feed: FEED })?;

    let request = client
        .get(QUERY_URL)
        .query(&query.params(out_fields(tables)));
    let body = get_json(request, FEED).await?;

    parse_features(&body, tables, county, state_code)
}

fn out_fields(tables: &ReferenceTables) -> String {
    let mut fields = vec![
        "COUNTY".to_string(),
        "STATEABBRV".to_string(),
        "RISK_SCORE".to_string(),
        "RISK_RATNG".to_string(),
    ];
    for hazard in tables.hazards() {
        fields.push(format!("{}_RISKS", hazard.code));
        fields.push(format!("{}_RISKR", hazard.code));
    }
    fields.join(",")
}

fn escape_literal(raw: &str) -> String {
    raw.replace('\'', "''")
}

pub(crate) fn parse_features(
    body: &Value,
    tables: &ReferenceTables,
    county: &str,
    state_code: &str,
) -> Result<NaturalHazardsData, SourceError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown ArcGIS error")
            .to_string();
        return Err(SourceError::Parse {
            feed: FEED,
            message,
        });
    }

    let attributes = body
        .get("features")
        .and_then(Value::as_array)
        .and_then(|features| features.first())
        .and_then(|feature| feature.get("attributes"))
        .ok_or(SourceError::NoData { feed: FEED })?;

    let mut hazards: Vec<HazardRisk> = tables
        .hazards()
        .iter()
        .filter_map(|hazard| {
            let score = number(attributes, &format!("{}_RISKS", hazard.code))?;
            if score <= 0.0 {
                return None;
            }
            let rating = attributes
                .get(format!("{}_RISKR", hazard.code).as_str())
                .map(normalize_rating)
                .unwrap_or(NOT_RATED);
            Some(HazardRisk {
                name: hazard.name.to_string(),
                risk_score: Some(round_tenth(score)),
                risk_rating: rating.to_string(),
                icon: hazard.icon.to_string(),
            })
        })
        .collect();

    hazards.sort_by(|a, b| {
        b.risk_score
            .unwrap_or(0.0)
            .total_cmp(&a.risk_score.unwrap_or(0.0))
    });

    let overall_risk_score = number(attributes, "RISK_SCORE").map(round_tenth);
    let overall_risk_rating = attributes
        .get("RISK_RATNG")
        .map(normalize_rating)
        .unwrap_or(NOT_RATED);

    Ok(NaturalHazardsData {
        overall_risk_score,
        overall_risk_rating: overall_risk_rating.to_string(),
        hazards,
        county: text(attributes, "COUNTY").unwrap_or_else(|| clean_county(county).to_string()),
        state: text(attributes, "STATEABBRV").unwrap_or_else(|| state_code.trim().to_string()),
    })
}

const NOT_RATED: &str = "Not Rated";

/// NRI publishes ratings either as text or as a 1-5 ordinal, which may
/// itself arrive as a string.
pub(crate) fn normalize_rating(raw: &Value) -> &'static str {
    match raw {
        Value::Number(value) => value.as_f64().map_or(NOT_RATED, ordinal_rating),
        Value::String(value) => {
            let lowered = value.trim().to_ascii_lowercase();
            if let Ok(ordinal) = lowered.parse::<f64>() {
                return ordinal_rating(ordinal);
            }
            match lowered.as_str() {
                "very high" => "Very High",
                "relatively high" => "Relatively High",
                "relatively moderate" | "moderate" => "Relatively Moderate",
                "relatively low" => "Relatively Low",
                "very low" => "Very Low",
                _ => NOT_RATED,
            }
        }
        _ => NOT_RATED,
    }
}

fn ordinal_rating(value: f64) -> &'static str {
    if !value.is_finite() {
        return NOT_RATED;
    }
    match value.round() as i64 {
        5 => "Very High",
        4 => "Relatively High",
        3 => "Relatively Moderate",
        2 => "Relatively Low",
        1 => "Very Low",
        _ => NOT_RATED,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
