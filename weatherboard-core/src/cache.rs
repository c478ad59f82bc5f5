//! Session-scoped forecast cache. Lives in memory only; a new run of the
//! dashboard always starts cold, matching the feed's own refresh cadence.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::ForecastResponse;

/// How long a fetched forecast stays fresh. The upstream feed recomputes
/// roughly every ten minutes, so holding entries longer only serves stale data.
pub const DEFAULT_TTL_MINUTES: i64 = 10;

#[derive(Debug)]
pub struct SessionCache {
    ttl: TimeDelta,
    entries: HashMap<String, Cached>,
}

#[derive(Debug)]
struct Cached {
    fetched_at: DateTime<Utc>,
    data: ForecastResponse,
}

impl SessionCache {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(TimeDelta::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Returns the cached forecast for `place` if one was stored less than
    /// the TTL before `now`. Callers supply `now` so freshness is decided in
    /// exactly one place.
    pub fn get(&self, place: &str, now: DateTime<Utc>) -> Option<&ForecastResponse> {
        let cached = self.entries.get(&cache_key(place))?;

        if now.signed_duration_since(cached.fetched_at) < self.ttl {
            tracing::debug!(%place, "forecast cache hit");
            Some(&cached.data)
        } else {
            tracing::debug!(%place, "forecast cache entry is stale");
            None
        }
    }

    pub fn insert(&mut self, place: &str, data: ForecastResponse, now: DateTime<Utc>) {
        self.entries.insert(
            cache_key(place),
            Cached {
                fetched_at: now,
                data,
            },
        );
    }

    pub fn invalidate(&mut self, place: &str) {
        self.entries.remove(&cache_key(place));
    }
}

/// Place names differ only in casing and padding between the search box and
/// the feed; one key spelling keeps them from double-caching.
fn cache_key(place: &str) -> String {
    place.trim().to_lowercase()
}
