//! EPA SDWIS drinking-water systems and their violations.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use chrono::NaiveDate;
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use super::{get_json, number, rows, text, SourceError};
use crate::workflows::assessment::domain::{WaterSafetyData, WaterViolation};
use crate::workflows::assessment::reference::ReferenceTables;

const FEED: &str = "EPA SDWIS";
const SYSTEMS_URL: &str = "https://data.epa.gov/efservice/WATER_SYSTEM/ZIP_CODE";
const VIOLATIONS_URL: &str = "https://data.epa.gov/efservice/VIOLATION/PWSID";
const MAX_SYSTEMS: usize = 5;
const MAX_LISTED: usize = 20;
const TOP_CONTAMINANTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WaterSystem {
    pub pwsid: String,
    pub name: String,
    pub population_served: u64,
    pub activity_code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawViolation {
    pub contaminant_code: String,
    pub category_code: String,
    pub health_based: bool,
    pub period_begin: Option<NaiveDate>,
    pub pws_name: String,
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    tables: &ReferenceTables,
    zip: &str,
) -> Result<WaterSafetyData, SourceError> {
    let body = get_json(client.get(format!("{SYSTEMS_URL}/{zip}/JSON")), FEED).await?;
    let active = match screen_systems(rows(&body)) {
        ControlFlow::Continue(active) => active,
        ControlFlow::Break(data) => return Ok(data),
    };

    let batches = join_all(
        active
            .iter()
            .map(|system| fetch_system_violations(client, system)),
    )
    .await;
    let violations = batches.into_iter().flatten().collect();

    Ok(summarize(tables, active.len(), violations))
}

/// A system that cannot be queried contributes no violations.
async fn fetch_system_violations(client: &reqwest::Client, system: &WaterSystem) -> Vec<RawViolation> {
    let request = client.get(format!("{VIOLATIONS_URL}/{}/JSON", system.pwsid));
    match get_json(request, FEED).await {
        Ok(body) => parse_violations(rows(&body), &system.name),
        Err(err) => {
            warn!(pwsid = %system.pwsid, error = %err, "skipping water system violations");
            Vec::new()
        }
    }
}

pub(crate) fn parse_systems(rows: &[Value]) -> Vec<WaterSystem> {
    rows.iter()
        .filter_map(|row| {
            let pwsid = text(row, "pwsid")?;
            Some(WaterSystem {
                name: text(row, "pws_name").unwrap_or_else(|| "Unknown".to_string()),
                population_served: number(row, "population_served_count")
                    .map(|count| count.max(0.0) as u64)
                    .unwrap_or(0),
                activity_code: text(row, "pws_activity_code").unwrap_or_default(),
                pwsid,
            })
        })
        .collect()
}

/// Active systems worth querying, or the finished result when there are none.
/// The system count in the summary covers every row the feed returned.
pub(crate) fn screen_systems(rows: &[Value]) -> ControlFlow<WaterSafetyData, Vec<WaterSystem>> {
    if rows.is_empty() {
        return ControlFlow::Break(WaterSafetyData {
            total_violations: 0,
            violations: Vec::new(),
            summary: "No public water systems found for this ZIP code.".to_string(),
        });
    }

    let active = select_active(parse_systems(rows));
    if active.is_empty() {
        return ControlFlow::Break(WaterSafetyData {
            total_violations: 0,
            violations: Vec::new(),
            summary: format!(
                "Found {} water system(s) but none currently active. No violations to report.",
                rows.len()
            ),
        });
    }

    ControlFlow::Continue(active)
}

/// Active (`A`) or newly added (`N`) systems, largest population first.
pub(crate) fn select_active(systems: Vec<WaterSystem>) -> Vec<WaterSystem> {
    let mut active: Vec<WaterSystem> = systems
        .into_iter()
        .filter(|system| matches!(system.activity_code.as_str(), "A" | "N"))
        .collect();
    active.sort_by(|a, b| b.population_served.cmp(&a.population_served));
    active.truncate(MAX_SYSTEMS);
    debug!(systems = active.len(), "selected active water systems");
    active
}

pub(crate) fn parse_violations(rows: &[Value], pws_name: &str) -> Vec<RawViolation> {
    rows.iter()
        .map(|row| RawViolation {
            contaminant_code: text(row, "contaminant_code").unwrap_or_default(),
            category_code: text(row, "violation_category_code").unwrap_or_default(),
            health_based: text(row, "is_health_based_ind").as_deref() == Some("Y"),
            period_begin: text(row, "compl_per_begin_date").and_then(|raw| parse_period(&raw)),
            pws_name: pws_name.to_string(),
        })
        .collect()
}

fn parse_period(raw: &str) -> Option<NaiveDate> {
    let iso = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%b-%y"))
        .ok()
}

pub(crate) fn summarize(
    tables: &ReferenceTables,
    system_count: usize,
    mut raw: Vec<RawViolation>,
) -> WaterSafetyData {
    // Newest compliance period first; undated rows sink to the end.
    raw.sort_by(|a, b| b.period_begin.cmp(&a.period_begin));

    let violations: Vec<WaterViolation> = raw
        .into_iter()
        .map(|violation| WaterViolation {
            contaminant_name: tables.contaminant_name(&violation.contaminant_code),
            violation_type: tables.violation_type(&violation.category_code),
            compliance_period: violation
                .period_begin
                .map(|date| date.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            pws_name: violation.pws_name,
            enforcement_action: violation
                .health_based
                .then(|| WaterViolation::HEALTH_BASED.to_string()),
        })
        .collect();

    let total = violations.len();
    let health_based = violations
        .iter()
        .filter(|violation| violation.is_health_based())
        .count();

    let mut contaminant_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for violation in &violations {
        if violation.contaminant_name.contains("No contaminant") {
            continue;
        }
        *contaminant_counts
            .entry(violation.contaminant_name.as_str())
            .or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = contaminant_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top: Vec<String> = ranked
        .into_iter()
        .take(TOP_CONTAMINANTS)
        .map(|(name, count)| format!("{name} ({count})"))
        .collect();

    let summary = if total == 0 {
        format!(
            "Found {system_count} water system(s) with no violations on record. This is a positive indicator."
        )
    } else {
        let mut summary = format!("Found {total} violation(s) across {system_count} water system(s).");
        if health_based > 0 {
            summary.push_str(&format!(" {health_based} are health-based."));
        }
        if !top.is_empty() {
            summary.push_str(&format!(" Top issues: {}.", top.join(", ")));
        }
        summary
    };

    let mut violations = violations;
    violations.truncate(MAX_LISTED);

    WaterSafetyData {
        total_violations: u32::try_from(total).unwrap_or(u32::MAX),
        violations,
        summary,
    }
}
