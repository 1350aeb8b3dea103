use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for both upstream endpoints.
///
/// Values are forwarded verbatim; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub city_name: String,
    /// Number of forecast days as text, e.g. `"7"`.
    pub days: Option<String>,
}

impl SearchParams {
    pub fn forecast(city_name: impl Into<String>, days: impl Into<String>) -> Self {
        Self { city_name: city_name.into(), days: Some(days.into()) }
    }

    pub fn search(city_name: impl Into<String>) -> Self {
        Self { city_name: city_name.into(), days: None }
    }
}

/// One entry of the `search.json` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl LocationCandidate {
    /// A bare candidate carrying only a city name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            region: None,
            country: None,
            lat: None,
            lon: None,
            url: None,
        }
    }

    /// `"<name>, <country>"` as shown in the search dropdown.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country.as_deref().unwrap_or_default())
    }
}

/// The `forecast.json` response.
///
/// Every leaf is optional so partial payloads still decode; consumers
/// render whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub current: Option<Current>,
    #[serde(default)]
    pub forecast: Option<Forecast>,
}

impl WeatherPayload {
    pub fn forecast_days(&self) -> &[ForecastDay] {
        self.forecast.as_ref().map(|f| f.forecast_days.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tz_id: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: Option<String>,
    /// Protocol-relative icon URL, e.g. `//cdn.weatherapi.com/...png`.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Current {
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub feelslike_c: Option<f64>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default, rename = "forecastday")]
    pub forecast_days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub astro: Option<Astro>,
    #[serde(default)]
    pub day: Option<Day>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
    #[serde(default)]
    pub moonrise: Option<String>,
    #[serde(default)]
    pub moonset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default)]
    pub avgtemp_c: Option<f64>,
    #[serde(default)]
    pub maxtemp_c: Option<f64>,
    #[serde(default)]
    pub mintemp_c: Option<f64>,
    #[serde(default)]
    pub condition: Option<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_forecast_payload() {
        let body = r#"{
            "location": { "name": "Paris", "country": "France" },
            "current": { "temp_c": 18.4, "condition": { "text": "Sunny" } },
            "forecast": { "forecastday": [
                { "date": "2024-05-06", "day": { "avgtemp_c": 16.1 } },
                { "date": "2024-05-07" }
            ] }
        }"#;

        let payload: WeatherPayload = serde_json::from_str(body).expect("payload should decode");

        assert_eq!(payload.location.as_ref().and_then(|l| l.name.as_deref()), Some("Paris"));
        assert_eq!(payload.current.as_ref().and_then(|c| c.humidity), None);
        assert_eq!(payload.forecast_days().len(), 2);
        assert_eq!(
            payload.forecast_days()[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
        assert!(payload.forecast_days()[1].day.is_none());
    }

    #[test]
    fn empty_object_decodes_to_empty_payload() {
        let payload: WeatherPayload = serde_json::from_str("{}").expect("payload should decode");
        assert_eq!(payload, WeatherPayload::default());
        assert!(payload.forecast_days().is_empty());
    }

    #[test]
    fn candidate_label_tolerates_missing_country() {
        let mut candidate = LocationCandidate::named("London");
        assert_eq!(candidate.label(), "London, ");

        candidate.country = Some("United Kingdom".into());
        assert_eq!(candidate.label(), "London, United Kingdom");
    }

    #[test]
    fn search_params_constructors() {
        assert_eq!(SearchParams::forecast("Paris", "7").days.as_deref(), Some("7"));
        assert_eq!(SearchParams::search("Lond").days, None);
    }
}
