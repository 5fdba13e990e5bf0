//! OpenWeather API client.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::*;

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Issues the current-conditions and forecast requests.
///
/// No retry, caching or rate limiting: every call is one GET.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    units: Units,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: &str, units: Units) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            units,
            base_url: OPENWEATHER_API_BASE.to_string(),
        }
    }

    /// Point the client at another API root (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fail requests that take longer than `timeout`.
    ///
    /// # Errors
    /// Returns [`WeatherError::Network`] if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WeatherError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current conditions for `query`, with the response body kept in
    /// [`CurrentConditions::raw_json`].
    #[instrument(skip(self), fields(units = self.units.as_param()), level = "info")]
    pub async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, WeatherError> {
        let body: serde_json::Value = self.get("weather", query).await?;
        let api = ApiCurrentResponse::deserialize(&body).map_err(parse_error)?;
        let mut current = CurrentConditions::try_from(api)?;
        current.raw_json = serde_json::to_string_pretty(&body).map_err(parse_error)?;
        Ok(current)
    }

    /// 5-day forecast in 3-hour steps for `query`.
    #[instrument(skip(self), fields(units = self.units.as_param()), level = "info")]
    pub async fn fetch_forecast(&self, query: &LocationQuery) -> Result<Forecast, WeatherError> {
        let api: ApiForecastResponse = self.get("forecast", query).await?;
        Forecast::try_from(api)
    }

    /// Both requests, issued concurrently.
    pub async fn fetch_all(
        &self,
        query: &LocationQuery,
    ) -> (
        Result<CurrentConditions, WeatherError>,
        Result<Forecast, WeatherError>,
    ) {
        tokio::join!(self.fetch_current(query), self.fetch_forecast(query))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = query.params();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_param().to_string()));

        let response = self.client.get(&url).query(&params).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(parse_error)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            tracing::warn!("Weather API returned {}: {}", status, message);
            Err(WeatherError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn parse_error(e: serde_json::Error) -> WeatherError {
    tracing::warn!("Failed to decode weather response: {}", e);
    WeatherError::Parse(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let client = WeatherClient::new("key", Units::Metric);
        assert_eq!(client.base_url(), OPENWEATHER_API_BASE);
        assert_eq!(client.units(), Units::Metric);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = WeatherClient::new("key", Units::Imperial).with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_set_units() {
        let mut client = WeatherClient::new("key", Units::Metric);
        client.set_units(Units::Imperial);
        assert_eq!(client.units(), Units::Imperial);
    }
}
