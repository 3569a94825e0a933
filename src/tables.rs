/// Agronomic reference tables for the water-monitoring service.
///
/// This is the single source of truth for every static coefficient the
/// calculators consume: crop water requirements, soil moisture factors,
/// pump power draws, tariffs, and per-crop daily usage bands. All other
/// modules should reference these tables (usually through
/// `config::ReferenceConfig`) rather than hardcoding values.
///
/// Sources:
///   - Crop seasonal requirements: regional agricultural extension tables
///   - Pump draws: nameplate kW equivalents of common HP ratings
///   - Tariffs: flat state electricity and water rates

// ---------------------------------------------------------------------------
// Crop water requirements
// ---------------------------------------------------------------------------

/// Seasonal water requirement per crop, in millimeters over one growing
/// season. Keys are lowercase crop names as the dashboard sends them.
pub static CROP_WATER_REQUIREMENTS_MM: &[(&str, f64)] = &[
    ("rice", 1200.0),
    ("wheat", 450.0),
    ("corn", 500.0),
    ("cotton", 700.0),
    ("sugarcane", 1500.0),
    ("potato", 350.0),
    ("tomato", 400.0),
    ("soybean", 450.0),
];

/// Fallback for crops not in the table. Deliberately mid-range so an
/// unrecognized crop still gets a workable irrigation estimate.
pub const DEFAULT_CROP_REQUIREMENT_MM: f64 = 500.0;

// ---------------------------------------------------------------------------
// Soil moisture factors
// ---------------------------------------------------------------------------

/// Multiplier on the base requirement per soil class. Clay retains water
/// (below 1), sandy soil drains (above 1).
pub static SOIL_MOISTURE_FACTORS: &[(&str, f64)] = &[
    ("clay", 0.9),
    ("loam", 1.0),
    ("sandy", 1.2),
];

pub const DEFAULT_SOIL_FACTOR: f64 = 1.0;

// ---------------------------------------------------------------------------
// Pump power ratings
// ---------------------------------------------------------------------------

/// Electrical draw in kW per nameplate HP rating.
pub static PUMP_POWER_RATINGS_KW: &[(&str, f64)] = &[
    ("0.5hp", 0.373),
    ("1hp", 0.746),
    ("2hp", 1.492),
    ("3hp", 2.238),
    ("5hp", 3.73),
];

/// Unknown rating keys fall back to the 2 HP draw — the most common pump
/// on the farms this system serves.
pub const DEFAULT_PUMP_POWER_KW: f64 = 1.492;

// ---------------------------------------------------------------------------
// Tariffs and targets
// ---------------------------------------------------------------------------

/// Flat electricity tariff, rupees per kWh.
pub const ELECTRICITY_RATE_PER_KWH: f64 = 8.50;

/// Flat water tariff, rupees per liter.
pub const WATER_RATE_PER_LITER: f64 = 0.06;

/// Daily farm-wide water budget shown as the dashboard reference line,
/// in liters.
pub const DAILY_WATER_TARGET_L: f64 = 30_000.0;

// ---------------------------------------------------------------------------
// Per-crop daily usage bands
// ---------------------------------------------------------------------------

/// (crop, minimum, maximum) daily usage in liters. Usage below the minimum
/// classifies as underused, above the maximum as overused. Crops without a
/// band always classify as optimal.
pub static CROP_USAGE_BANDS_L: &[(&str, f64, f64)] = &[
    ("rice", 7000.0, 10000.0),
    ("wheat", 4000.0, 6000.0),
    ("corn", 3000.0, 5000.0),
    ("cotton", 5000.0, 7500.0),
    ("tomato", 3500.0, 5500.0),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
