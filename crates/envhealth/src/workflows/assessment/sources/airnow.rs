//! AirNow current observations by ZIP code.

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use super::{get_json, number, rows, text, SourceError};
use crate::workflows::assessment::domain::{AirPollutant, AirQualityData};

const FEED: &str = "AirNow";
const OBSERVATIONS_URL: &str = "https://www.airnowapi.org/aq/observation/zipCode/current/";
const PLACEHOLDER_KEY: &str = "YOUR_AIRNOW_KEY";
const SEARCH_DISTANCE_MILES: &str = "50";

pub(crate) async fn fetch(
    client: &reqwest::Client,
    api_key: Option<&str>,
    zip: &str,
) -> Result<AirQualityData, SourceError> {
    let today = Utc::now().date_naive().to_string();

    let Some(api_key) = api_key.filter(|key| is_configured(key)) else {
        warn!("AirNow API key not configured; set AIRNOW_API_KEY");
        return Ok(AirQualityData::without_reading(
            "API key not configured",
            "N/A",
            today,
        ));
    };

    let request = client.get(OBSERVATIONS_URL).query(&[
        ("format", "application/json"),
        ("zipCode", zip),
        ("distance", SEARCH_DISTANCE_MILES),
        ("API_KEY", api_key),
    ]);
    let body = get_json(request, FEED).await?;

    Ok(parse_observations(&body, today))
}

fn is_configured(key: &str) -> bool {
    !key.trim().is_empty() && key != PLACEHOLDER_KEY
}

/// Reduces observations to the worst AQI reading plus one entry per pollutant.
pub(crate) fn parse_observations(body: &Value, today: String) -> AirQualityData {
    let observations = rows(body);
    if observations.is_empty() {
        return AirQualityData::without_reading("No data available", "", today);
    }

    let mut max_aqi = 0;
    let mut max_category = category_for_aqi(0).to_string();
    let mut pollutants = Vec::with_capacity(observations.len());

    for observation in observations {
        let aqi = number(observation, "AQI")
            .map(|value| value.round() as i32)
            .unwrap_or(0);
        let category = observation["Category"]["Name"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| category_for_aqi(aqi).to_string());

        if aqi > max_aqi {
            max_aqi = aqi;
            max_category = category.clone();
        }

        pollutants.push(AirPollutant {
            name: text(observation, "ParameterName").unwrap_or_else(|| "Unknown".to_string()),
            aqi,
            category,
            concentration: number(observation, "Concentration").unwrap_or(0.0),
            unit: text(observation, "Unit").unwrap_or_else(|| "µg/m³".to_string()),
        });
    }

    let first = &observations[0];
    AirQualityData {
        aqi: Some(max_aqi),
        category: max_category,
        pollutants,
        reporting_area: text(first, "ReportingArea").unwrap_or_default(),
        state_code: text(first, "StateCode").unwrap_or_default(),
        date_observed: text(first, "DateObserved").unwrap_or(today),
    }
}

/// EPA AQI category bands.
pub(crate) fn category_for_aqi(aqi: i32) -> &'static str {
    match aqi {
        i32::MIN..=50 => "Good",
        51..=100 => "Moderate",
        101..=150 => "Unhealthy for Sensitive Groups",
        151..=200 => "Unhealthy",
        201..=300 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_the_worst_reading() {
        let body = json!([
            {
                "DateObserved": "2025-06-01 ",
                "ReportingArea": "Richmond",
                "StateCode": "VA",
                "ParameterName": "O3",
                "AQI": 42,
                "Category": { "Number": 1, "Name": "Good" }
            },
            {
                "DateObserved": "2025-06-01 ",
                "ReportingArea": "Richmond",
                "StateCode": "VA",
                "ParameterName": "PM2.5",
                "AQI": 61
            }
        ]);

        let data = parse_observations(&body, "2025-06-02".to_string());
        assert_eq!(data.aqi, Some(61));
        assert_eq!(data.category, "Moderate");
        assert_eq!(data.pollutants.len(), 2);
        assert_eq!(data.reporting_area, "Richmond");
        assert_eq!(data.date_observed, "2025-06-01");
    }

    #[test]
    fn empty_payload_has_no_reading() {
        let data = parse_observations(&json!([]), "2025-06-02".to_string());
        assert_eq!(data.aqi, None);
        assert_eq!(data.category, "No data available");
    }

    #[test]
    fn placeholder_key_is_not_configured() {
        assert!(!is_configured(PLACEHOLDER_KEY));
        assert!(!is_configured("  "));
        assert!(is_configured("abc123"));
    }
}
