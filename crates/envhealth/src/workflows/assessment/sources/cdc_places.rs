//! CDC PLACES ZCTA-level health measures.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use super::{get_json, number, rows, text, SourceError};
use crate::workflows::assessment::domain::{Comparison, HealthMeasure, HealthOutcomesData};
use crate::workflows::assessment::reference::ReferenceTables;

const FEED: &str = "CDC PLACES";
const PRIMARY_DATASET: &str = "https://data.cdc.gov/resource/qnzd-25i4.json";
const FALLBACK_DATASET: &str = "https://data.cdc.gov/resource/cwsq-ngmh.json";
const CRUDE_PREVALENCE: &str = "CrdPrv";
const ROW_LIMIT: &str = "100";
const DEFAULT_DATA_YEAR: &str = "2023";

pub(crate) async fn fetch(
    client: &reqwest::Client,
    tables: &ReferenceTables,
    zip: &str,
) -> Result<HealthOutcomesData, SourceError> {
    let primary = client.get(PRIMARY_DATASET).query(&[
        ("locationname", zip),
        ("$limit", ROW_LIMIT),
        ("datavaluetypeid", CRUDE_PREVALENCE),
    ]);

    let body = match get_json(primary, FEED).await {
        Ok(body) => body,
        Err(SourceError::Status { status, .. }) => {
            warn!(%status, "primary PLACES dataset failed; trying fallback");
            let fallback = client
                .get(FALLBACK_DATASET)
                .query(&[("locationname", zip), ("$limit", ROW_LIMIT)]);
            get_json(fallback, FEED).await?
        }
        Err(err) => return Err(err),
    };

    let rows = rows(&body);
    if rows.is_empty() {
        return Err(SourceError::NoData { feed: FEED });
    }

    Ok(parse_rows(rows, tables))
}

pub(crate) fn parse_rows(rows: &[Value], tables: &ReferenceTables) -> HealthOutcomesData {
    let mut seen = HashSet::new();
    let mut measures = Vec::new();
    let mut data_year: Option<String> = None;

    for row in rows {
        // Age-adjusted rows would duplicate the crude ones.
        if let Some(value_type) = text(row, "datavaluetypeid") {
            if value_type != CRUDE_PREVALENCE {
                continue;
            }
        }

        let Some(measure_id) = text(row, "measureid").or_else(|| text(row, "measure")) else {
            continue;
        };
        if seen.contains(&measure_id) {
            continue;
        }
        seen.insert(measure_id.clone());

        let value = match number(row, "data_value") {
            Some(value) if value.is_finite() && value != 0.0 => value,
            _ => continue,
        };

        let short_name = text(row, "short_question_text").unwrap_or_else(|| measure_id.clone());
        let (measure_name, category) = match tables.measure(&measure_id) {
            Some(info) => (info.name.to_string(), info.category.to_string()),
            None => (
                short_name.clone(),
                ReferenceTables::measure_category(&text(row, "category").unwrap_or_default()),
            ),
        };

        let national_avg = tables.national_average(&measure_id);
        if data_year.is_none() {
            data_year = text(row, "year");
        }

        measures.push(HealthMeasure {
            category,
            measure_name,
            short_name,
            data_value: value,
            national_avg,
            unit: "%".to_string(),
            comparison: Comparison::against(value, national_avg),
        });
    }

    // By category, then furthest above the national average first.
    measures.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| excess(b).total_cmp(&excess(a)))
    });

    HealthOutcomesData {
        measures,
        data_year: data_year.unwrap_or_else(|| DEFAULT_DATA_YEAR.to_string()),
        source: HealthOutcomesData::SOURCE.to_string(),
    }
}

fn excess(measure: &HealthMeasure) -> f64 {
    measure
        .national_avg
        .map(|avg| measure.data_value - avg)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compares_against_national_baselines() {
        let tables = ReferenceTables::standard();
        let body = json!([
            { "measureid": "DIABETES", "data_value": "14.9", "datavaluetypeid": "CrdPrv", "year": "2022", "short_question_text": "Diabetes" },
            { "measureid": "DIABETES", "data_value": "13.0", "datavaluetypeid": "AgeAdjPrv" },
            { "measureid": "CASTHMA", "data_value": "10.1", "datavaluetypeid": "CrdPrv" },
            { "measureid": "COPD", "data_value": "4.0", "datavaluetypeid": "CrdPrv" },
            { "measureid": "BINGE", "data_value": "18.0", "datavaluetypeid": "CrdPrv" },
            { "measureid": "STROKE", "data_value": "0", "datavaluetypeid": "CrdPrv" }
        ]);

        let data = parse_rows(rows(&body), &tables);
        assert_eq!(data.data_year, "2022");
        assert_eq!(data.measures.len(), 4);

        let comparison = |id_name: &str| {
            data.measures
                .iter()
                .find(|measure| measure.measure_name == id_name)
                .map(|measure| measure.comparison)
        };
        assert_eq!(comparison("Diabetes"), Some(Comparison::Above));
        assert_eq!(comparison("Current Asthma"), Some(Comparison::Average));
        assert_eq!(comparison("COPD"), Some(Comparison::Below));
        assert_eq!(comparison("Binge Drinking"), Some(Comparison::Unknown));
    }

    #[test]
    fn sorts_by_category_then_excess() {
        let tables = ReferenceTables::standard();
        let body = json!([
            { "measureid": "CHD", "data_value": "6.0" },
            { "measureid": "BPHIGH", "data_value": "40.0" },
            { "measureid": "ARTHRITIS", "data_value": "30.0" }
        ]);

        let data = parse_rows(rows(&body), &tables);
        let names: Vec<&str> = data
            .measures
            .iter()
            .map(|measure| measure.measure_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["High Blood Pressure", "Coronary Heart Disease", "Arthritis"]
        );
        assert_eq!(data.data_year, DEFAULT_DATA_YEAR);
    }
}
