/// Land-area unit conversion and numeric presentation helpers.

use crate::model::AreaUnit;

impl AreaUnit {
    /// Hectares per one of this unit.
    pub fn hectare_factor(self) -> f64 {
        match self {
            AreaUnit::Acre => 0.404686,
            AreaUnit::Hectare => 1.0,
            // A killa is the same as an acre in most regions that use it.
            AreaUnit::Killa => 0.404686,
            AreaUnit::Gaj => 0.000008361,
            AreaUnit::SquareMeter => 0.0001,
        }
    }
}

/// Converts a land area to hectares.
pub fn to_hectares(size: f64, unit: AreaUnit) -> f64 {
    size * unit.hectare_factor()
}

/// Converts a land area given a unit name from the dashboard.
///
/// An unrecognized name is treated as already-hectares (factor 1.0). This
/// permissive default is deliberate — the dashboard historically accepted
/// free-text units, and a wrong-but-plausible estimate beats a hard error
/// for that input.
pub fn to_hectares_named(size: f64, unit_name: &str) -> f64 {
    match AreaUnit::from_name(unit_name) {
        Some(unit) => to_hectares(size, unit),
        None => size,
    }
}

/// Rounds to 2 decimal places, the precision the dashboard displays for
/// liters, kWh, and rupees.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 1 decimal place, used for percentages and trends.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
