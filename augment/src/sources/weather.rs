//! QWeather backend
//!
//! Resolves the city through the GeoAPI, then reads current conditions.
//! See: https://dev.qweather.com/docs/api/weather/weather-now/

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ensure_success, SourceAdapter};
use crate::classifier::extract_city;
use crate::config::WeatherConfig;
use crate::error::SourceError;
use crate::types::SearchResult;

const NAME: &str = "weather";

/// QWeather reports success in the body, not the status line
const QWEATHER_OK: &str = "200";

pub struct WeatherSource {
    client: Client,
    config: WeatherConfig,
}

impl WeatherSource {
    pub fn new(client: Client, config: WeatherConfig) -> Self {
        Self { client, config }
    }

    async fn lookup_city(&self, city: &str) -> Result<Option<GeoLocation>, SourceError> {
        let url = format!("{}/city/lookup", self.config.geo_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("location", city), ("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let geo: GeoResponse = ensure_success(NAME, response)?.json().await?;
        if geo.code != QWEATHER_OK {
            tracing::debug!(code = %geo.code, city, "City lookup unsuccessful");
            return Ok(None);
        }

        Ok(geo.location.into_iter().next())
    }
}

// QWeather API response types
#[derive(Debug, Deserialize)]
struct GeoResponse {
    code: String,
    #[serde(default)]
    location: Vec<GeoLocation>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    name: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct NowResponse {
    code: String,
    now: Option<NowConditions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NowConditions {
    text: String,
    temp: String,
    humidity: String,
    wind_speed: String,
    #[serde(default)]
    wind_dir: Option<String>,
}

#[async_trait]
impl SourceAdapter for WeatherSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let city = extract_city(query, &self.config.default_city);
        tracing::debug!(%city, "Fetching weather");

        let Some(location) = self.lookup_city(&city).await? else {
            return Ok(None);
        };

        let url = format!("{}/weather/now", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("location", location.id.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let weather: NowResponse = ensure_success(NAME, response)?.json().await?;
        let now = match (weather.code.as_str(), weather.now) {
            (QWEATHER_OK, Some(now)) => now,
            (code, _) => {
                tracing::debug!(code, "Weather API reported no current conditions");
                return Ok(None);
            }
        };

        let wind = match now.wind_dir.as_deref() {
            Some(dir) if !dir.is_empty() => format!("{} {} km/h", dir, now.wind_speed),
            _ => format!("{} km/h", now.wind_speed),
        };

        let content = format!(
            "{}当前天气：{}，温度 {}°C，湿度 {}%，风速 {}",
            location.name, now.text, now.temp, now.humidity, wind
        );

        Ok(Some(SearchResult::new(NAME, content, 0.9)))
    }
}
