use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::ApiConfig,
    http::HttpClient,
    model::{LocationCandidate, SearchParams, WeatherPayload},
};

/// The two lookups the screen needs.
///
/// Implementations resolve to `None` when there is no data; they never fail.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn fetch_forecast(&self, params: &SearchParams) -> Option<WeatherPayload>;
    async fn fetch_locations(&self, params: &SearchParams) -> Option<Vec<LocationCandidate>>;
}

/// WeatherAPI.com `forecast.json` and `search.json`.
#[derive(Debug, Clone)]
pub struct WeatherApi {
    config: ApiConfig,
    http: HttpClient,
}

impl WeatherApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config, http: HttpClient::new() }
    }

    /// `city_name` and `days` are interpolated as-is, without escaping.
    /// When `days` is absent the parameter is left out and the upstream
    /// default applies.
    pub fn forecast_url(&self, params: &SearchParams) -> String {
        let days = params.days.as_deref().map(|d| format!("&days={d}")).unwrap_or_default();
        format!(
            "{}/forecast.json?key={}&q={}{days}&aqi=no&alerts=no",
            self.config.base_url, self.config.api_key, params.city_name,
        )
    }

    pub fn locations_url(&self, params: &SearchParams) -> String {
        format!(
            "{}/search.json?key={}&q={}",
            self.config.base_url, self.config.api_key, params.city_name,
        )
    }
}

#[async_trait]
impl WeatherService for WeatherApi {
    async fn fetch_forecast(&self, params: &SearchParams) -> Option<WeatherPayload> {
        tracing::debug!(city = %params.city_name, days = ?params.days, "fetching forecast");
        self.http.request("forecast", &self.forecast_url(params)).await
    }

    async fn fetch_locations(&self, params: &SearchParams) -> Option<Vec<LocationCandidate>> {
        tracing::debug!(query = %params.city_name, "searching locations");
        self.http.request("search", &self.locations_url(params)).await
    }
}
