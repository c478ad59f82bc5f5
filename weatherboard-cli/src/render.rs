//! Terminal output for the dashboard. Everything renders to plain strings so
//! each screen can be asserted in tests without a live feed.

use chrono::Timelike;
use clap::ValueEnum;

use weatherboard_core::model::{ForecastEntry, ForecastResponse};
use weatherboard_core::units::{kelvin_to_celsius, meters_to_km, mps_to_kmh};

pub const LOCATION_NOT_FOUND: &str = "Location not found";

/// Shown while a fetch is in flight.
pub const LOADING: &str = "Loading....";

/// Three-hour samples shown in the hourly strip, one day's worth.
const HOURLY_SAMPLES: usize = 8;

// Placeholder readings for samples the feed did not deliver.
const FALLBACK_TEMP_K: f64 = 298.34;
const FALLBACK_WIND_MPS: f64 = 1.64;
const FALLBACK_VISIBILITY_M: f64 = 10_000.0;
const FALLBACK_HUMIDITY_PCT: f64 = 90.0;
const FALLBACK_PRESSURE_HPA: f64 = 1008.0;
const FALLBACK_ICON: &str = "01d";

/// Output palette. Light keeps restrained colors for bright terminals; Dark
/// leans on brighter accents so headings stay readable on dark backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    const RESET: &'static str = "\u{1b}[0m";

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Light => "\u{1b}[1;34m",
            Self::Dark => "\u{1b}[1;33m",
        }
    }

    fn dim(self) -> &'static str {
        match self {
            Self::Light => "\u{1b}[90m",
            Self::Dark => "\u{1b}[37m",
        }
    }
}

/// The full dashboard screen: header, today panel and the daily forecast.
pub fn render_dashboard(data: &ForecastResponse, theme: Theme) -> String {
    let mut out = render_header(data, theme);
    out.push_str(&render_today(data, theme));
    out.push('\n');
    out.push_str(&render_forecast(data, theme));
    out
}

fn render_header(data: &ForecastResponse, theme: Theme) -> String {
    format!(
        "{}Weather app{}  {}, {}\n\n",
        theme.heading(),
        Theme::RESET,
        data.city.name,
        data.city.country
    )
}

fn render_today(data: &ForecastResponse, theme: Theme) -> String {
    let first = data.list.first();
    let mut out = String::new();

    match first {
        Some(entry) => {
            let date = entry.dt.date_naive();
            out.push_str(&format!(
                "{}{} ({}){}\n",
                theme.heading(),
                date.format("%A"),
                date.format("%d.%m.%Y"),
                Theme::RESET
            ));
        }
        None => out.push_str(&format!("{}Today{}\n", theme.heading(), Theme::RESET)),
    }

    let temp = first.map_or(FALLBACK_TEMP_K, |e| e.main.temp);
    let feels_like = first.map_or(FALLBACK_TEMP_K, |e| e.main.feels_like);
    let temp_min = first.map_or(0.0, |e| e.main.temp_min);
    let temp_max = first.map_or(0.0, |e| e.main.temp_max);
    out.push_str(&format!(
        "  {}°  Feels like {}°  {}°↓ {}°↑\n",
        kelvin_to_celsius(temp),
        kelvin_to_celsius(feels_like),
        kelvin_to_celsius(temp_min),
        kelvin_to_celsius(temp_max)
    ));

    for entry in data.list.iter().take(HOURLY_SAMPLES) {
        let time = entry.dt.format("%-I:%M %p").to_string();
        out.push_str(&format!(
            "    {time:<9} {}  {}°\n",
            glyph(&entry_icon(entry)),
            kelvin_to_celsius(entry.main.temp)
        ));
    }

    if let Some(entry) = first {
        if let Some(condition) = entry.weather.first() {
            out.push_str(&format!(
                "  {} {}\n",
                capitalize(&condition.description),
                glyph(&entry_icon(entry))
            ));
        }
    }

    out.push_str("  ");
    out.push_str(&details_line(first, data, theme));
    out.push('\n');
    out
}

fn render_forecast(data: &ForecastResponse, theme: Theme) -> String {
    let mut out = format!("{}Forecast (7 days){}\n", theme.heading(), Theme::RESET);

    for summary in data.daily_summaries() {
        let entry = summary.representative;
        let icon = entry
            .and_then(|e| e.weather.first())
            .map_or(FALLBACK_ICON, |c| c.icon.as_str());
        let temp = entry.map_or(0.0, |e| e.main.temp);
        let feels_like = entry.map_or(0.0, |e| e.main.feels_like);
        let description = entry
            .and_then(|e| e.weather.first())
            .map_or_else(String::new, |c| capitalize(&c.description));

        out.push_str(&format!(
            "  {}  {} {}  {}°  Feels like {}°  {}\n",
            glyph(icon),
            summary.date.format("%d.%m"),
            summary.date.format("%A"),
            kelvin_to_celsius(temp),
            kelvin_to_celsius(feels_like),
            description
        ));
        out.push_str("     ");
        out.push_str(&details_line(entry, data, theme));
        out.push('\n');
    }

    out
}

fn details_line(entry: Option<&ForecastEntry>, data: &ForecastResponse, theme: Theme) -> String {
    let offset = data.city.utc_offset();
    let visibility = entry
        .and_then(|e| e.visibility)
        .unwrap_or(FALLBACK_VISIBILITY_M);
    let humidity = entry.map_or(FALLBACK_HUMIDITY_PCT, |e| e.main.humidity);
    let wind = entry.map_or(FALLBACK_WIND_MPS, |e| e.wind.speed);
    let pressure = entry.map_or(FALLBACK_PRESSURE_HPA, |e| e.main.pressure);

    format!(
        "{}Visibility {}  Humidity {}%  Wind speed {}  Air pressure {} hPa  Sunrise {}  Sunset {}{}",
        theme.dim(),
        meters_to_km(visibility),
        humidity,
        mps_to_kmh(wind),
        pressure,
        data.city.sunrise.with_timezone(&offset).format("%-H:%M"),
        data.city.sunset.with_timezone(&offset).format("%-H:%M"),
        Theme::RESET
    )
}

fn entry_icon(entry: &ForecastEntry) -> String {
    entry.weather.first().map_or_else(
        || FALLBACK_ICON.to_string(),
        |c| day_night_icon(&c.icon, entry.dt.hour()),
    )
}

/// Feed icon codes end in "d" or "n"; the suffix follows the sample's own
/// hour rather than the wall clock at render time.
fn day_night_icon(icon: &str, hour: u32) -> String {
    let suffix = if (6..18).contains(&hour) { 'd' } else { 'n' };
    match icon.strip_suffix(['d', 'n']) {
        Some(code) => format!("{code}{suffix}"),
        None => icon.to_string(),
    }
}

fn glyph(icon: &str) -> &'static str {
    match icon {
        "01d" => "☀",
        "01n" => "☽",
        "02d" | "02n" => "⛅",
        "03d" | "03n" | "04d" | "04n" => "☁",
        "09d" | "09n" => "☔",
        "10d" | "10n" => "☂",
        "11d" | "11n" => "⚡",
        "13d" | "13n" => "❄",
        "50d" | "50n" => "≡",
        _ => "•",
    }
}

fn capitalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
