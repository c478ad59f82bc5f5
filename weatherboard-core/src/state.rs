//! Dashboard session state: the currently selected place, the loading flag
//! and the cache sit here, and every forecast the UI shows flows through
//! [`Dashboard::current`].

use anyhow::{Context, Result};
use chrono::Utc;

use crate::cache::SessionCache;
use crate::model::{ForecastResponse, FoundPlace};
use crate::provider::ForecastProvider;

/// Shortest query the autocomplete forwards upstream. Anything shorter
/// matches half the planet and returns instantly as "no suggestions".
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn ForecastProvider>,
    cache: SessionCache,
    place: String,
    loading: bool,
}

impl Dashboard {
    pub fn new(provider: Box<dyn ForecastProvider>, place: impl Into<String>) -> Self {
        Self {
            provider,
            cache: SessionCache::with_default_ttl(),
            place: place.into(),
            loading: false,
        }
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The only write path for the selected place. The name is recorded
    /// before the fetch, so a failed fetch leaves the dashboard pointing at
    /// the requested place rather than silently reverting to the old one.
    pub async fn set_place(&mut self, place: &str) -> Result<ForecastResponse> {
        self.place = place.trim().to_string();
        tracing::info!(place = %self.place, "place selected");
        self.refresh().await
    }

    /// Forecast for the selected place, served from the cache when a fresh
    /// entry exists.
    pub async fn current(&mut self) -> Result<ForecastResponse> {
        if let Some(data) = self.cache.get(&self.place, Utc::now()) {
            return Ok(data.clone());
        }
        self.fetch_current().await
    }

    /// Drops the cached entry for the selected place and refetches.
    pub async fn refresh(&mut self) -> Result<ForecastResponse> {
        self.cache.invalidate(&self.place);
        self.fetch_current().await
    }

    /// Resolves coordinates to a place name and selects it.
    pub async fn locate(&mut self, lat: f64, lon: f64) -> Result<ForecastResponse> {
        self.loading = true;
        let resolved = self.provider.locate(lat, lon).await;
        self.loading = false;

        let name = resolved
            .with_context(|| format!("failed to resolve ({lat}, {lon}) to a place name"))?;
        self.set_place(&name).await
    }

    /// Autocomplete hits for a partially typed place name.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<FoundPlace>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        self.provider
            .search(query)
            .await
            .with_context(|| format!("failed to search for places matching '{query}'"))
    }

    async fn fetch_current(&mut self) -> Result<ForecastResponse> {
        self.loading = true;
        let fetched = self.provider.forecast(&self.place).await;
        self.loading = false;

        let data = fetched
            .with_context(|| format!("failed to fetch the forecast for '{}'", self.place))?;
        tracing::debug!(
            place = %self.place,
            samples = data.cnt,
            days = data.distinct_dates(),
            "forecast fetched"
        );
        self.cache.insert(&self.place, data.clone(), Utc::now());
        Ok(data)
    }
}
