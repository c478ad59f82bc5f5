//! Core library for the `weatherboard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the [`provider::ForecastProvider`] trait
//! - Shared domain models, unit conversions and the daily forecast grouping
//! - Session state: selected place, loading flag and the forecast cache
//!
//! It is used by `weatherboard-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod daily;
pub mod model;
pub mod provider;
pub mod state;
pub mod units;

pub use cache::SessionCache;
pub use config::Config;
pub use daily::{DailySummary, daily_summaries};
pub use model::{City, ForecastEntry, ForecastResponse, FoundPlace};
pub use provider::{ForecastProvider, OpenWeather, ProviderError, provider_from_config};
pub use state::Dashboard;
