use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    AirQualityData, Domain, DomainResults, HealthOutcomesData, Location, NaturalHazardsData,
    ToxicSitesData, WaterSafetyData,
};
use super::recommendations::{generate_recommendations, Recommendation};
use super::reference::ReferenceTables;
use super::scoring::{CategoryScorer, OverallScore, ScoringConfig};
use super::sources::{EnvironmentalSources, SourceError};

/// The assembled report returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReport {
    pub location: Location,
    pub overall_score: OverallScore,
    pub air_quality: AirQualityData,
    pub water_safety: WaterSafetyData,
    pub toxic_sites: ToxicSitesData,
    pub health_outcomes: HealthOutcomesData,
    pub natural_hazards: NaturalHazardsData,
    pub unavailable_sources: Vec<Domain>,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("ZIP code is required.")]
    MissingZip,
    #[error("Failed to generate report")]
    AllSourcesFailed,
}

/// Fans a location out to every data source and folds the results into a
/// scored report.
pub struct ReportAssembler<S> {
    sources: Arc<S>,
    scorer: CategoryScorer,
    tables: Arc<ReferenceTables>,
}

impl<S> ReportAssembler<S>
where
    S: EnvironmentalSources + 'static,
{
    pub fn new(sources: Arc<S>, tables: Arc<ReferenceTables>, scoring: ScoringConfig) -> Self {
        Self {
            sources,
            scorer: CategoryScorer::new(scoring),
            tables,
        }
    }

    pub fn scorer(&self) -> &CategoryScorer {
        &self.scorer
    }

    /// Generate a report for `location`.
    ///
    /// Every adapter runs concurrently. A failing adapter is replaced by its
    /// domain's "unavailable" result; only a missing ZIP or a total outage
    /// fails the request.
    pub async fn generate(&self, location: Location) -> Result<EnvironmentalReport, ReportError> {
        if !location.has_zip() {
            return Err(ReportError::MissingZip);
        }

        let zip = location.zip.trim();
        let sources = self.sources.as_ref();
        let (air, water, toxic, health, hazards) = tokio::join!(
            sources.air_quality(zip),
            sources.water_violations(zip),
            sources.toxic_releases(zip),
            sources.health_outcomes(zip),
            sources.natural_hazards(&location.county, &location.state_code, location.coordinates()),
        );

        let mut unavailable = Vec::new();
        let results = DomainResults {
            air_quality: settle(Domain::AirQuality, air, &mut unavailable, AirQualityData::unavailable),
            water_safety: settle(
                Domain::WaterSafety,
                water,
                &mut unavailable,
                WaterSafetyData::unavailable,
            ),
            toxic_sites: settle(
                Domain::ToxicSites,
                toxic,
                &mut unavailable,
                ToxicSitesData::unavailable,
            ),
            health_outcomes: settle(
                Domain::HealthOutcomes,
                health,
                &mut unavailable,
                HealthOutcomesData::unavailable,
            ),
            natural_hazards: settle(Domain::NaturalHazards, hazards, &mut unavailable, || {
                NaturalHazardsData::unavailable(&location.county, &location.state_code)
            }),
            unavailable,
        };

        if results.unavailable.len() == Domain::ordered().len() {
            warn!(zip, "every data source failed");
            return Err(ReportError::AllSourcesFailed);
        }

        let overall_score = self.scorer.evaluate(&results);
        let recommendations =
            generate_recommendations(&results, &self.tables, self.scorer.config());

        info!(
            zip,
            grade = overall_score.grade.label(),
            score = overall_score.score,
            unavailable = results.unavailable.len(),
            "environmental report assembled"
        );

        let DomainResults {
            air_quality,
            water_safety,
            toxic_sites,
            health_outcomes,
            natural_hazards,
            unavailable,
        } = results;

        Ok(EnvironmentalReport {
            location,
            overall_score,
            air_quality,
            water_safety,
            toxic_sites,
            health_outcomes,
            natural_hazards,
            unavailable_sources: unavailable,
            recommendations,
            generated_at: Utc::now(),
        })
    }
}

fn settle<T>(
    domain: Domain,
    outcome: Result<T, SourceError>,
    unavailable: &mut Vec<Domain>,
    fallback: impl FnOnce() -> T,
) -> T {
    match outcome {
        Ok(data) => data,
        Err(error) => {
            warn!(domain = domain.label(), %error, "data source failed; using defaults");
            unavailable.push(domain);
            fallback()
        }
    }
}
