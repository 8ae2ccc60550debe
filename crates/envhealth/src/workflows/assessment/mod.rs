//! Environmental health assessment for a US location.
//!
//! A [`ReportAssembler`] queries five federal data feeds through the
//! [`EnvironmentalSources`] seam, scores each domain with the
//! [`CategoryScorer`], and returns an [`EnvironmentalReport`] with a letter
//! grade, per-domain detail, and recommendations.

pub mod domain;
pub mod recommendations;
pub mod reference;
pub mod router;
pub mod scoring;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use domain::{
    clean_county, AirPollutant, AirQualityData, Comparison, Domain, DomainResult, DomainResults,
    HazardRisk, HealthMeasure, HealthOutcomesData, Location, NaturalHazardsData, ToxicFacility,
    ToxicSitesData, WaterSafetyData, WaterViolation,
};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use reference::ReferenceTables;
pub use router::report_router;
pub use scoring::{CategoryScore, CategoryScorer, Grade, OverallScore, ScoreColor, ScoringConfig};
pub use service::{EnvironmentalReport, ReportAssembler, ReportError};
pub use sources::{EnvironmentalSources, FederalDataSources, SourceError};
