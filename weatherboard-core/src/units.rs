//! Conversions from the feed's raw units to the display units the dashboard
//! prints. All functions are pure and total over finite input.

/// Converts Kelvin to whole Celsius degrees, rounded to the nearest integer.
///
/// Non-finite input follows `as`-cast semantics: NaN becomes 0 and infinities
/// saturate at the `i64` bounds.
#[must_use]
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - 273.15).round() as i64
}

/// Formats a speed in m/s as a whole-number km/h string, e.g. `"6km/h"`.
#[must_use]
pub fn mps_to_kmh(mps: f64) -> String {
    let kmh = mps * 3.6;
    format!("{}km/h", kmh.round() as i64)
}

/// Formats a distance in meters as a whole-number kilometer string,
/// e.g. `"10km"`.
#[must_use]
pub fn meters_to_km(meters: f64) -> String {
    format!("{}km", (meters / 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_freezing_and_boiling_points() {
        assert_eq!(kelvin_to_celsius(273.15), 0);
        assert_eq!(kelvin_to_celsius(373.15), 100);
    }

    #[test]
    fn kelvin_rounds_to_nearest_degree() {
        assert_eq!(kelvin_to_celsius(300.46), 27); // 27.31
        assert_eq!(kelvin_to_celsius(299.64), 26); // 26.49
        assert_eq!(kelvin_to_celsius(299.65), 27); // 26.50 rounds away from zero
    }

    #[test]
    fn kelvin_handles_absolute_zero_and_nan() {
        assert_eq!(kelvin_to_celsius(0.0), -273);
        // Documented cast behavior, not a meaningful temperature.
        assert_eq!(kelvin_to_celsius(f64::NAN), 0);
        assert_eq!(kelvin_to_celsius(f64::INFINITY), i64::MAX);
    }

    #[test]
    fn celsius_round_trips_through_kelvin() {
        for celsius in -40..=45 {
            let kelvin = f64::from(celsius) + 273.15;
            assert_eq!(kelvin_to_celsius(kelvin), i64::from(celsius));
        }
    }

    #[test]
    fn wind_speed_formats_with_suffix() {
        assert_eq!(mps_to_kmh(0.0), "0km/h");
        assert_eq!(mps_to_kmh(1.64), "6km/h"); // 5.904
        assert_eq!(mps_to_kmh(10.0), "36km/h");
    }

    #[test]
    fn wind_speed_parses_back_to_rounded_kmh() {
        let mut mps = 0.0_f64;
        while mps < 30.0 {
            let formatted = mps_to_kmh(mps);
            let digits = formatted
                .strip_suffix("km/h")
                .expect("suffix must be present");
            let parsed: i64 = digits.parse().expect("prefix must be an integer");
            assert_eq!(parsed, (mps * 3.6).round() as i64);
            mps += 0.37;
        }
    }

    #[test]
    fn visibility_formats_in_kilometers() {
        assert_eq!(meters_to_km(10000.0), "10km");
        assert_eq!(meters_to_km(1500.0), "2km");
        assert_eq!(meters_to_km(999.0), "1km");
        assert_eq!(meters_to_km(0.0), "0km");
    }
}
