//! Upstream federal data feeds.
//!
//! The report assembler only sees the [`EnvironmentalSources`] trait; each
//! method is independently fallible and the assembler decides what a failure
//! means for the report. [`FederalDataSources`] is the live implementation
//! backed by AirNow, EPA Envirofacts, CDC PLACES, and FEMA NRI.

pub(crate) mod airnow;
pub(crate) mod cdc_places;
pub(crate) mod epa_tri;
pub(crate) mod epa_water;
pub(crate) mod fema_nri;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::domain::{
    AirQualityData, HealthOutcomesData, NaturalHazardsData, ToxicSitesData, WaterSafetyData,
};
use super::reference::ReferenceTables;
use crate::config::SourcesConfig;

/// Errors raised by a single data feed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{feed} responded with status {status}")]
    Status {
        feed: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{feed} returned an unusable payload: {message}")]
    Parse { feed: &'static str, message: String },
    #[error("{feed} has no data for this location")]
    NoData { feed: &'static str },
}

/// Collaborator interface for the five upstream feeds.
#[async_trait]
pub trait EnvironmentalSources: Send + Sync {
    async fn air_quality(&self, zip: &str) -> Result<AirQualityData, SourceError>;

    async fn water_violations(&self, zip: &str) -> Result<WaterSafetyData, SourceError>;

    async fn toxic_releases(&self, zip: &str) -> Result<ToxicSitesData, SourceError>;

    async fn health_outcomes(&self, zip: &str) -> Result<HealthOutcomesData, SourceError>;

    async fn natural_hazards(
        &self,
        county: &str,
        state_code: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Result<NaturalHazardsData, SourceError>;
}

/// Live adapters sharing one HTTP client.
pub struct FederalDataSources {
    client: reqwest::Client,
    airnow_api_key: Option<String>,
    tables: Arc<ReferenceTables>,
}

impl FederalDataSources {
    pub fn new(config: &SourcesConfig, tables: Arc<ReferenceTables>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("envhealth/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            airnow_api_key: config.airnow_api_key.clone(),
            tables,
        })
    }
}

#[async_trait]
impl EnvironmentalSources for FederalDataSources {
    async fn air_quality(&self, zip: &str) -> Result<AirQualityData, SourceError> {
        airnow::fetch(&self.client, self.airnow_api_key.as_deref(), zip).await
    }

    async fn water_violations(&self, zip: &str) -> Result<WaterSafetyData, SourceError> {
        epa_water::fetch(&self.client, &self.tables, &path_segment(zip)).await
    }

    async fn toxic_releases(&self, zip: &str) -> Result<ToxicSitesData, SourceError> {
        epa_tri::fetch(&self.client, &path_segment(zip)).await
    }

    async fn health_outcomes(&self, zip: &str) -> Result<HealthOutcomesData, SourceError> {
        cdc_places::fetch(&self.client, &self.tables, zip).await
    }

    async fn natural_hazards(
        &self,
        county: &str,
        state_code: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Result<NaturalHazardsData, SourceError> {
        fema_nri::fetch(&self.client, &self.tables, county, state_code, coordinates).await
    }
}

/// Keeps only characters that are safe inside a URL path segment.
fn path_segment(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
        .collect()
}

pub(crate) async fn get_json(
    request: reqwest::RequestBuilder,
    feed: &'static str,
) -> Result<Value, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status { feed, status });
    }
    let body: Value = response.json().await?;
    debug!(feed, rows = rows(&body).len(), "received payload");
    Ok(body)
}

/// Top-level JSON array, or nothing for any other shape.
pub(crate) fn rows(body: &Value) -> &[Value] {
    body.as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Envirofacts and Socrata are inconsistent about key casing.
fn field<'a>(row: &'a Value, key: &str) -> &'a Value {
    match row.get(key) {
        Some(value) if !value.is_null() => value,
        _ => row
            .get(key.to_ascii_uppercase().as_str())
            .unwrap_or(&Value::Null),
    }
}

/// Non-empty string value, also accepting bare numbers.
pub(crate) fn text(row: &Value, key: &str) -> Option<String> {
    match field(row, key) {
        Value::String(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Numeric value, also accepting numeric strings.
pub(crate) fn number(row: &Value, key: &str) -> Option<f64> {
    match field(row, key) {
        Value::Number(value) => value.as_f64(),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}
