//! EPA Envirofacts Toxics Release Inventory facilities by ZIP code.

use std::collections::HashSet;

use serde_json::Value;

use super::{get_json, number, rows, text, SourceError};
use crate::workflows::assessment::domain::{ToxicFacility, ToxicSitesData};

const FEED: &str = "EPA TRI";
const FACILITY_URL: &str = "https://data.epa.gov/efservice/TRI_FACILITY/ZIP_CODE";
const MAX_LISTED: usize = 25;

pub(crate) async fn fetch(client: &reqwest::Client, zip: &str) -> Result<ToxicSitesData, SourceError> {
    let request = client.get(format!("{FACILITY_URL}/{zip}/JSON"));
    let body = get_json(request, FEED).await?;
    Ok(parse_facilities(rows(&body), zip))
}

/// Facilities repeat once per reported chemical; keep one row per name.
pub(crate) fn parse_facilities(rows: &[Value], zip: &str) -> ToxicSitesData {
    let mut seen = HashSet::new();
    let mut facilities: Vec<ToxicFacility> = rows
        .iter()
        .filter_map(|row| {
            let name = text(row, "facility_name").unwrap_or_else(|| "Unknown facility".to_string());
            if !seen.insert(name.clone()) {
                return None;
            }

            Some(ToxicFacility {
                facility_name: name,
                street_address: text(row, "street_address").unwrap_or_default(),
                city: text(row, "city_name").unwrap_or_default(),
                state: text(row, "state_abbr").unwrap_or_default(),
                zip: text(row, "zip_code").unwrap_or_else(|| zip.to_string()),
                industry: text(row, "industry_sector").unwrap_or_else(|| "Unknown".to_string()),
                latitude: coordinate(row, "pref_latitude"),
                longitude: coordinate(row, "pref_longitude"),
            })
        })
        .collect();

    facilities.sort_by(|a, b| a.facility_name.cmp(&b.facility_name));

    let total = facilities.len();
    let summary = match total {
        0 => "No toxic release inventory facilities found in this ZIP code.".to_string(),
        1 => "Found 1 facility reporting toxic releases in this ZIP code.".to_string(),
        n => format!("Found {n} facilities reporting toxic releases in this ZIP code."),
    };
    facilities.truncate(MAX_LISTED);

    ToxicSitesData {
        total_facilities: u32::try_from(total).unwrap_or(u32::MAX),
        facilities,
        summary,
    }
}

fn coordinate(row: &Value, key: &str) -> Option<f64> {
    number(row, key).filter(|value| *value != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dedupes_and_sorts_by_name() {
        let body = json!([
            { "facility_name": "Zinc Works", "city_name": "Richmond", "pref_latitude": "0" },
            { "facility_name": "Acme Chemical", "pref_latitude": "37.54", "pref_longitude": "-77.43" },
            { "FACILITY_NAME": "Zinc Works", "CITY_NAME": "Richmond" }
        ]);

        let data = parse_facilities(rows(&body), "23220");
        assert_eq!(data.total_facilities, 2);
        assert_eq!(data.facilities[0].facility_name, "Acme Chemical");
        assert_eq!(data.facilities[0].latitude, Some(37.54));
        assert_eq!(data.facilities[1].latitude, None);
        assert_eq!(data.facilities[1].zip, "23220");
        assert!(data.summary.contains("2 facilities"));
    }

    #[test]
    fn empty_zip_is_a_clean_result() {
        let data = parse_facilities(&[], "23220");
        assert_eq!(data.total_facilities, 0);
        assert!(data.facilities.is_empty());
    }
}
