//! HTTP access to the OpenWeatherMap endpoints the dashboard uses: the
//! 5-day/3-hour forecast, the place-search feed behind the autocomplete,
//! and the current-weather lookup that resolves coordinates to a name.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;
use crate::model::{ForecastResponse, FoundPlace, FoundResponse, NamedLocation};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Samples requested per forecast fetch: eight 3-hour samples for 7 days.
pub const FORECAST_SAMPLES: u32 = 56;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach OpenWeather: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse OpenWeather {endpoint} JSON")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The upstream operations the dashboard state depends on. Kept as a trait
/// so tests can drive the state machine without a network.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the multi-day forecast for a place name.
    async fn forecast(&self, place: &str) -> Result<ForecastResponse, ProviderError>;

    /// Search places matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<FoundPlace>, ProviderError>;

    /// Resolve coordinates to the place name the feed knows them by.
    async fn locate(&self, lat: f64, lon: f64) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeather {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Same client against a different host; used by tests to point at a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Parse { endpoint, source })
    }
}

#[async_trait]
impl ForecastProvider for OpenWeather {
    async fn forecast(&self, place: &str) -> Result<ForecastResponse, ProviderError> {
        tracing::debug!(%place, "requesting forecast");

        let cnt = FORECAST_SAMPLES.to_string();
        let data: ForecastResponse = self
            .get_json("forecast", &[("q", place), ("cnt", cnt.as_str())])
            .await?;

        tracing::debug!(
            city = %data.city.name,
            samples = data.list.len(),
            "forecast received"
        );
        Ok(data)
    }

    async fn search(&self, query: &str) -> Result<Vec<FoundPlace>, ProviderError> {
        tracing::debug!(%query, "searching places");

        let found: FoundResponse = self.get_json("find", &[("q", query)]).await?;
        Ok(found.list)
    }

    async fn locate(&self, lat: f64, lon: f64) -> Result<String, ProviderError> {
        tracing::debug!(lat, lon, "resolving coordinates");

        let lat = lat.to_string();
        let lon = lon.to_string();
        let named: NamedLocation = self
            .get_json("weather", &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        tracing::debug!(place = %named.name, "coordinates resolved");
        Ok(named.name)
    }
}

/// Construct the production provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeather> {
    let api_key = config.api_key()?;
    Ok(OpenWeather::new(api_key)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
