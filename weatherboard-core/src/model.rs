//! Typed mirror of the OpenWeatherMap responses the dashboard consumes.
//!
//! The raw JSON is validated into these structs at the boundary; everything
//! past this module works with checked fields instead of loose maps.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Deserialize;

use crate::daily::{DailySummary, daily_summaries};

/// One page of the 5-day/3-hour forecast feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub cod: String,
    #[serde(default)]
    pub message: i64,
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub city: City,
}

impl ForecastResponse {
    /// One summary per calendar date in the list, selected with the city's
    /// own UTC offset as the local clock.
    pub fn daily_summaries(&self) -> Vec<DailySummary<'_>> {
        daily_summaries(&self.list, self.city.utc_offset())
    }

    /// Number of distinct UTC calendar dates covered by the list.
    pub fn distinct_dates(&self) -> usize {
        let mut dates: Vec<NaiveDate> = Vec::new();
        for entry in &self.list {
            let date = entry.dt.date_naive();
            if !dates.contains(&date) {
                dates.push(date);
            }
        }
        dates.len()
    }
}

/// One timestamped forecast sample.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Sample time, transmitted as epoch seconds.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub clouds: Clouds,
    pub wind: Wind,
    /// Average visibility in meters; the feed omits it occasionally.
    pub visibility: Option<f64>,
    /// Probability of precipitation, 0.0..=1.0.
    #[serde(default)]
    pub pop: f64,
    pub sys: EntrySys,
    /// Human-readable copy of `dt`, e.g. `"2024-01-01 09:00:00"`.
    pub dt_txt: String,
}

/// Temperature block of one sample. All temperatures are Kelvin.
#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Sea-level pressure in hPa.
    pub pressure: f64,
    pub sea_level: Option<f64>,
    pub grnd_level: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub temp_kf: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    /// Icon code such as `"04d"`; the trailing letter is day/night.
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Clouds {
    /// Cloud cover in percent.
    pub all: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s.
    pub speed: f64,
    /// Direction in meteorological degrees.
    pub deg: f64,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntrySys {
    /// Part of day, `"d"` or `"n"`.
    pub pod: String,
}

/// Location block sent alongside the forecast list.
#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    pub country: String,
    #[serde(default)]
    pub population: i64,
    /// Shift from UTC in seconds.
    pub timezone: i32,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
}

impl City {
    /// The city's UTC offset; falls back to UTC if the feed sends an
    /// out-of-range shift.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone).unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Response of the place-search endpoint used for autocomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct FoundResponse {
    #[serde(default)]
    pub list: Vec<FoundPlace>,
}

/// One search hit; displayed as `"Name, CC"` when a country is known.
#[derive(Debug, Clone, Deserialize)]
pub struct FoundPlace {
    pub name: String,
    #[serde(default)]
    pub sys: FoundSys,
    pub coord: Coord,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoundSys {
    pub country: Option<String>,
}

impl std::fmt::Display for FoundPlace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => {
                write!(f, "{}, {}", self.name, country)
            }
            _ => f.write_str(&self.name),
        }
    }
}

/// Minimal slice of the current-weather endpoint, enough to turn a pair of
/// coordinates back into a place name.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    #[serde(default)]
    pub sys: FoundSys,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn fixture() -> ForecastResponse {
        serde_json::from_value(serde_json::json!({
            "cod": "200",
            "message": 0,
            "cnt": 2,
            "list": [
                {
                    "dt": 1704074400,
                    "main": {
                        "temp": 300.46,
                        "feels_like": 303.08,
                        "temp_min": 299.1,
                        "temp_max": 301.6,
                        "pressure": 1008,
                        "sea_level": 1008,
                        "grnd_level": 1006,
                        "humidity": 74,
                        "temp_kf": 0.86
                    },
                    "weather": [
                        {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
                    ],
                    "clouds": {"all": 75},
                    "wind": {"speed": 3.24, "deg": 210, "gust": 5.1},
                    "visibility": 10000,
                    "pop": 0.32,
                    "sys": {"pod": "d"},
                    "dt_txt": "2024-01-01 02:00:00"
                },
                {
                    "dt": 1704085200,
                    "main": {
                        "temp": 301.9,
                        "feels_like": 304.2,
                        "temp_min": 301.9,
                        "temp_max": 302.4,
                        "pressure": 1007,
                        "humidity": 70
                    },
                    "weather": [
                        {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
                    ],
                    "clouds": {"all": 60},
                    "wind": {"speed": 2.1, "deg": 180},
                    "sys": {"pod": "d"},
                    "dt_txt": "2024-01-01 05:00:00"
                }
            ],
            "city": {
                "id": 1642911,
                "name": "Jakarta",
                "coord": {"lat": -6.2146, "lon": 106.8451},
                "country": "ID",
                "population": 8540121,
                "timezone": 25200,
                "sunrise": 1704063202,
                "sunset": 1704107750
            }
        }))
        .expect("fixture must deserialize")
    }

    #[test]
    fn forecast_response_parses_typed_fields() {
        let data = fixture();

        assert_eq!(data.cod, "200");
        assert_eq!(data.cnt, 2);
        assert_eq!(data.list.len(), 2);

        let first = &data.list[0];
        assert_eq!(first.dt.hour(), 2);
        assert_eq!(first.main.temp, 300.46);
        assert_eq!(first.weather[0].icon, "04d");
        assert_eq!(first.visibility, Some(10000.0));
        assert_eq!(first.wind.gust, Some(5.1));
        assert_eq!(first.dt_txt, "2024-01-01 02:00:00");
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let data = fixture();
        let second = &data.list[1];

        assert_eq!(second.visibility, None);
        assert_eq!(second.pop, 0.0);
        assert_eq!(second.wind.gust, None);
        assert_eq!(second.main.sea_level, None);
        assert_eq!(second.main.temp_kf, None);
    }

    #[test]
    fn city_offset_matches_timezone_shift() {
        let data = fixture();
        let offset = data.city.utc_offset();
        assert_eq!(offset.local_minus_utc(), 25200);

        // 02:00 UTC is 09:00 in Jakarta.
        let local = data.list[0].dt.with_timezone(&offset);
        assert_eq!(local.hour(), 9);
    }

    #[test]
    fn daily_summaries_uses_city_offset() {
        let data = fixture();
        let days = data.daily_summaries();

        assert_eq!(days.len(), 1);
        // At +07:00 the 02:00 UTC sample is already past the morning cutoff.
        let rep = days[0].representative.expect("representative entry");
        assert_eq!(rep.dt, data.list[0].dt);
    }

    #[test]
    fn distinct_dates_counts_unique_utc_days() {
        let data = fixture();
        assert_eq!(data.distinct_dates(), 1);
    }

    #[test]
    fn found_place_display_includes_country() {
        let place: FoundPlace = serde_json::from_value(serde_json::json!({
            "name": "London",
            "sys": {"country": "GB"},
            "coord": {"lat": 51.5085, "lon": -0.1257}
        }))
        .expect("place must deserialize");
        assert_eq!(place.to_string(), "London, GB");
    }

    #[test]
    fn found_place_display_without_country_is_bare_name() {
        let place: FoundPlace = serde_json::from_value(serde_json::json!({
            "name": "Atlantis",
            "coord": {"lat": 0.0, "lon": 0.0}
        }))
        .expect("place must deserialize");
        assert_eq!(place.to_string(), "Atlantis");
    }
}
