//! Daily water-requirement calculation.
//!
//! Combines the farm's converted area, the crop's seasonal base
//! requirement, the soil moisture factor, and the weather demand factor
//! into a daily volume. Unknown crops and soils silently use the table
//! defaults; there are no error conditions.

use serde::Serialize;

use crate::config::ReferenceConfig;
use crate::model::{FarmDescriptor, WeatherSnapshot};
use crate::units::{round2, to_hectares};
use crate::weather::weather_factor;

/// The seasonal base requirement is spread over a fixed 90-day growing
/// season. A deliberate simplification: actual season length varies by
/// crop and sowing date, but the dashboard plans day-to-day, and the
/// flat divisor keeps the estimate stable across the season.
const GROWING_SEASON_DAYS: f64 = 90.0;

/// Liters of water per hectare-millimeter.
const LITERS_PER_HECTARE_MM: f64 = 10_000.0;

/// A farm's computed daily requirement, with the factors that shaped it
/// so the dashboard can explain the number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterRequirement {
    pub daily_liters: f64,
    pub daily_cubic_meters: f64,
    pub soil_factor: f64,
    pub weather_factor: f64,
}

/// Computes the daily water requirement for a farm under the given
/// weather.
///
/// `liters = base_mm × hectares × 10000 × soil_factor × weather_factor / 90`,
/// reported to 2 decimals as the dashboard displays it.
pub fn daily_requirement(
    farm: &FarmDescriptor,
    weather: &WeatherSnapshot,
    cfg: &ReferenceConfig,
) -> WaterRequirement {
    let hectares = to_hectares(farm.area, farm.area_unit);
    let base_mm = cfg.crop_requirement_mm(&farm.crop_type);
    let soil_factor = cfg.soil_factor(farm.soil_type);
    let weather_factor = weather_factor(weather);

    let daily_liters =
        base_mm * hectares * LITERS_PER_HECTARE_MM * soil_factor * weather_factor
            / GROWING_SEASON_DAYS;

    WaterRequirement {
        daily_liters: round2(daily_liters),
        daily_cubic_meters: round2(daily_liters / 1000.0),
        soil_factor,
        weather_factor,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
