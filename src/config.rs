/// Reference-table configuration.
///
/// `ReferenceConfig` is the immutable snapshot of every coefficient the
/// calculators consume. Defaults come from the compiled tables in
/// [`crate::tables`]; deployments can override any of them with a TOML
/// file named by the `AGRIMON_CONFIG` environment variable (loaded after
/// `.env`). Tables never mutate after load — callers wanting different
/// coefficients build a new snapshot.

use std::collections::HashMap;
use std::env;
use std::fs;

use serde::Deserialize;

use crate::logging::{self, Component};
use crate::model::{CoreError, SoilType};
use crate::tables;

/// Environment variable naming the optional TOML override file.
pub const CONFIG_PATH_VAR: &str = "AGRIMON_CONFIG";

/// Immutable reference tables, passed explicitly into each calculator.
///
/// Maps are keyed by lowercase category names. A key missing from a map
/// is not an error — every lookup has a documented fallback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Crop → seasonal water requirement, mm.
    pub crop_requirements_mm: HashMap<String, f64>,
    /// Soil class → moisture factor.
    pub soil_factors: HashMap<String, f64>,
    /// Pump rating key → electrical draw, kW.
    pub pump_power_kw: HashMap<String, f64>,
    /// Crop → (min, max) daily usage band, liters.
    pub usage_bands_l: HashMap<String, (f64, f64)>,
    pub electricity_rate_per_kwh: f64,
    pub water_rate_per_liter: f64,
    pub daily_water_target_l: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        ReferenceConfig {
            crop_requirements_mm: tables::CROP_WATER_REQUIREMENTS_MM
                .iter()
                .map(|(crop, mm)| (crop.to_string(), *mm))
                .collect(),
            soil_factors: tables::SOIL_MOISTURE_FACTORS
                .iter()
                .map(|(soil, factor)| (soil.to_string(), *factor))
                .collect(),
            pump_power_kw: tables::PUMP_POWER_RATINGS_KW
                .iter()
                .map(|(rating, kw)| (rating.to_string(), *kw))
                .collect(),
            usage_bands_l: tables::CROP_USAGE_BANDS_L
                .iter()
                .map(|(crop, min, max)| (crop.to_string(), (*min, *max)))
                .collect(),
            electricity_rate_per_kwh: tables::ELECTRICITY_RATE_PER_KWH,
            water_rate_per_liter: tables::WATER_RATE_PER_LITER,
            daily_water_target_l: tables::DAILY_WATER_TARGET_L,
        }
    }
}

impl ReferenceConfig {
    /// Parses a TOML override document. Fields omitted from the document
    /// keep their defaults; a provided map replaces the default map as a
    /// whole.
    pub fn from_toml_str(document: &str) -> Result<ReferenceConfig, CoreError> {
        toml::from_str(document)
            .map_err(|e| CoreError::InvalidInput(format!("reference config TOML: {}", e)))
    }

    /// Loads configuration for this process: `.env`, then the file named
    /// by `AGRIMON_CONFIG` if set. Without the variable, the compiled
    /// defaults are used.
    pub fn load() -> Result<ReferenceConfig, CoreError> {
        dotenv::dotenv().ok();

        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let document = fs::read_to_string(&path).map_err(|e| {
                    CoreError::InvalidInput(format!("cannot read config file '{}': {}", path, e))
                })?;
                let config = Self::from_toml_str(&document)?;
                logging::info(
                    Component::System,
                    None,
                    &format!("reference config loaded from {}", path),
                );
                Ok(config)
            }
            Err(_) => {
                logging::debug(
                    Component::System,
                    None,
                    "no reference config file set, using compiled defaults",
                );
                Ok(ReferenceConfig::default())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lookups — every one has a documented fallback, unknown keys are
    // never errors.
    // -----------------------------------------------------------------------

    /// Seasonal requirement for a crop, mm. Unknown crop → 500.
    pub fn crop_requirement_mm(&self, crop: &str) -> f64 {
        self.crop_requirements_mm
            .get(&crop.to_ascii_lowercase())
            .copied()
            .unwrap_or(tables::DEFAULT_CROP_REQUIREMENT_MM)
    }

    /// Moisture factor for a soil class. Absent from the table → 1.0.
    pub fn soil_factor(&self, soil: SoilType) -> f64 {
        self.soil_factors
            .get(soil.name())
            .copied()
            .unwrap_or(tables::DEFAULT_SOIL_FACTOR)
    }

    /// Electrical draw for a pump rating key, kW. Unknown key → the 2 HP
    /// draw.
    pub fn pump_power_kw(&self, rating: &str) -> f64 {
        self.pump_power_kw
            .get(&rating.to_ascii_lowercase())
            .copied()
            .unwrap_or(tables::DEFAULT_PUMP_POWER_KW)
    }

    /// Daily usage band for a crop, liters. Crops without a band never
    /// classify as over- or underused.
    pub fn usage_band_l(&self, crop: &str) -> Option<(f64, f64)> {
        self.usage_bands_l.get(&crop.to_ascii_lowercase()).copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_compiled_tables() {
        let cfg = ReferenceConfig::default();
        assert_eq!(cfg.crop_requirement_mm("rice"), 1200.0);
        assert_eq!(cfg.soil_factor(SoilType::Clay), 0.9);
        assert_eq!(cfg.pump_power_kw("5hp"), 3.73);
        assert_eq!(cfg.usage_band_l("wheat"), Some((4000.0, 6000.0)));
        assert_eq!(cfg.electricity_rate_per_kwh, 8.50);
    }

    #[test]
    fn test_unknown_keys_fall_back_silently() {
        let cfg = ReferenceConfig::default();
        assert_eq!(cfg.crop_requirement_mm("quinoa"), 500.0);
        assert_eq!(cfg.pump_power_kw("7hp"), 1.492);
        assert_eq!(cfg.usage_band_l("quinoa"), None);
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let cfg = ReferenceConfig::default();
        assert_eq!(cfg.crop_requirement_mm("Rice"), 1200.0);
        assert_eq!(cfg.pump_power_kw("2HP"), 1.492);
    }

    #[test]
    fn test_partial_toml_override_keeps_other_defaults() {
        let cfg = ReferenceConfig::from_toml_str(
            r#"
            electricity_rate_per_kwh = 9.25

            [crop_requirements_mm]
            rice = 1100.0
            millet = 380.0
            "#,
        )
        .expect("valid override should parse");

        // Overridden values take effect.
        assert_eq!(cfg.electricity_rate_per_kwh, 9.25);
        assert_eq!(cfg.crop_requirement_mm("rice"), 1100.0);
        assert_eq!(cfg.crop_requirement_mm("millet"), 380.0);

        // The provided map replaced the default one...
        assert_eq!(cfg.crop_requirement_mm("wheat"), 500.0);
        // ...but untouched tables keep their defaults.
        assert_eq!(cfg.soil_factor(SoilType::Sandy), 1.2);
        assert_eq!(cfg.water_rate_per_liter, 0.06);
    }

    #[test]
    fn test_usage_band_override_parses_as_pair() {
        let cfg = ReferenceConfig::from_toml_str(
            r#"
            [usage_bands_l]
            rice = [6500.0, 9500.0]
            "#,
        )
        .expect("band override should parse");
        assert_eq!(cfg.usage_band_l("rice"), Some((6500.0, 9500.0)));
    }

    #[test]
    fn test_malformed_toml_is_invalid_input() {
        let err = ReferenceConfig::from_toml_str("electricity_rate_per_kwh = ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        // Catches typos in override files instead of silently ignoring
        // the whole table.
        let err = ReferenceConfig::from_toml_str("electricty_rate = 9.0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
