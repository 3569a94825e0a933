/// Weather-driven irrigation demand adjustment.
///
/// Maps a point-in-time weather snapshot onto a multiplicative demand
/// factor for the water-requirement calculator: hot or dry air raises
/// demand, cool or humid air and recent rain lower it. Pure arithmetic
/// over the snapshot — fetching the snapshot is the weather collaborator's
/// job, reached through [`WeatherProvider`].

use crate::model::{CoreError, WeatherSnapshot};

// ---------------------------------------------------------------------------
// Adjustment bands
// ---------------------------------------------------------------------------

/// Above this air temperature, evapotranspiration rises sharply.
const HOT_ABOVE_C: f64 = 35.0;
/// Below this, plant water uptake slows.
const COOL_BELOW_C: f64 = 20.0;
const DRY_BELOW_PCT: f64 = 40.0;
const HUMID_ABOVE_PCT: f64 = 80.0;

const DEMAND_UP: f64 = 1.2;
const DEMAND_DOWN: f64 = 0.8;

/// Demand reduction per millimeter of rain in the last hour.
const RAINFALL_ATTENUATION_PER_MM: f64 = 0.1;
/// Rain never cuts demand below half — standing crops still need water.
const RAINFALL_FACTOR_FLOOR: f64 = 0.5;

// ---------------------------------------------------------------------------
// Demand factor
// ---------------------------------------------------------------------------

/// Computes the multiplicative weather demand factor, starting from 1.0.
///
/// Each input contributes at most one band — temperature and humidity
/// bands are mutually exclusive per input and checked once — and the
/// contributions compose multiplicatively. The result has no bound other
/// than the explicit 0.5 floor on the rainfall term.
pub fn weather_factor(weather: &WeatherSnapshot) -> f64 {
    let mut factor = 1.0;

    if weather.temperature_c > HOT_ABOVE_C {
        factor *= DEMAND_UP;
    } else if weather.temperature_c < COOL_BELOW_C {
        factor *= DEMAND_DOWN;
    }

    if weather.humidity_pct < DRY_BELOW_PCT {
        factor *= DEMAND_UP;
    } else if weather.humidity_pct > HUMID_ABOVE_PCT {
        factor *= DEMAND_DOWN;
    }

    if weather.rainfall_1h_mm > 0.0 {
        factor *= (1.0 - weather.rainfall_1h_mm * RAINFALL_ATTENUATION_PER_MM)
            .max(RAINFALL_FACTOR_FLOOR);
    }

    factor
}

// ---------------------------------------------------------------------------
// Weather collaborator
// ---------------------------------------------------------------------------

/// Source of current weather conditions for a coordinate.
///
/// Implemented outside this core (the HTTP layer wraps its forecast
/// provider in this trait). Errors are surfaced to the caller unchanged —
/// the core never retries or substitutes stale data.
pub trait WeatherProvider {
    fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, CoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(temperature_c: f64, humidity_pct: f64, rainfall_1h_mm: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c,
            humidity_pct,
            rainfall_1h_mm,
        }
    }

    #[test]
    fn test_mild_weather_is_neutral() {
        assert_eq!(weather_factor(&snapshot(25.0, 60.0, 0.0)), 1.0);
    }

    #[test]
    fn test_heat_raises_demand() {
        assert_relative_eq!(weather_factor(&snapshot(36.0, 60.0, 0.0)), 1.2);
    }

    #[test]
    fn test_cool_weather_lowers_demand() {
        assert_relative_eq!(weather_factor(&snapshot(15.0, 60.0, 0.0)), 0.8);
    }

    #[test]
    fn test_band_boundaries_are_exclusive() {
        // Exactly 35 °C is not hot, exactly 20 °C is not cool; same for
        // the humidity edges.
        assert_eq!(weather_factor(&snapshot(35.0, 60.0, 0.0)), 1.0);
        assert_eq!(weather_factor(&snapshot(20.0, 60.0, 0.0)), 1.0);
        assert_eq!(weather_factor(&snapshot(25.0, 40.0, 0.0)), 1.0);
        assert_eq!(weather_factor(&snapshot(25.0, 80.0, 0.0)), 1.0);
    }

    #[test]
    fn test_dry_air_raises_and_humid_air_lowers_demand() {
        assert_relative_eq!(weather_factor(&snapshot(25.0, 30.0, 0.0)), 1.2);
        assert_relative_eq!(weather_factor(&snapshot(25.0, 90.0, 0.0)), 0.8);
    }

    #[test]
    fn test_rainfall_attenuates_linearly_down_to_the_floor() {
        assert_relative_eq!(
            weather_factor(&snapshot(25.0, 60.0, 2.0)),
            0.8,
            epsilon = 1e-12
        );
        // 8 mm would give 0.2; the floor holds at 0.5.
        assert_relative_eq!(weather_factor(&snapshot(25.0, 60.0, 8.0)), 0.5);
        assert_relative_eq!(weather_factor(&snapshot(25.0, 60.0, 100.0)), 0.5);
    }

    #[test]
    fn test_bands_compose_multiplicatively() {
        // Hot and dry stack: 1.2 * 1.2.
        assert_relative_eq!(
            weather_factor(&snapshot(40.0, 30.0, 0.0)),
            1.44,
            epsilon = 1e-12
        );
        // Cool, humid, and raining: 0.8 * 0.8 * 0.7.
        assert_relative_eq!(
            weather_factor(&snapshot(15.0, 90.0, 3.0)),
            0.448,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_monotonic_in_humidity_at_fixed_temperature_and_rain() {
        // Non-increasing above the humid threshold, non-decreasing below
        // the dry threshold.
        assert!(weather_factor(&snapshot(25.0, 85.0, 0.0)) <= weather_factor(&snapshot(25.0, 81.0, 0.0)));
        assert!(weather_factor(&snapshot(25.0, 30.0, 0.0)) >= weather_factor(&snapshot(25.0, 39.0, 0.0)));
        assert!(weather_factor(&snapshot(25.0, 30.0, 0.0)) >= weather_factor(&snapshot(25.0, 60.0, 0.0)));
        assert!(weather_factor(&snapshot(25.0, 60.0, 0.0)) >= weather_factor(&snapshot(25.0, 90.0, 0.0)));
    }
}
