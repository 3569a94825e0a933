/// Core data types for the agricultural water-monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and almost no logic — only types, their parsing helpers,
/// and the domain error taxonomy.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Water-quality severity tiers, in ascending order of severity.
///
/// The derived `Ord` is load-bearing: the hazard classifier reduces
/// per-channel findings to the maximum tier, so `Safe < Warning < Critical`
/// must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Safe,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Safe => write!(f, "Safe"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor readings
// ---------------------------------------------------------------------------

/// A single water-quality measurement from a field sensor.
///
/// Produced by the ingestion collaborator and treated as immutable from then
/// on. All channels are always present; a sensor that cannot measure a
/// channel does not report at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: String,
    pub temperature_c: f64,
    pub ph_level: f64,
    pub turbidity_ntu: f64,
    pub dissolved_oxygen_mg_l: f64,
    pub timestamp: DateTime<Utc>,
}

/// A flow-rate sample, in liters per minute.
///
/// Kept separate from `SensorReading`: water-quality probes do not report
/// flow; flow samples come from the usage telemetry on the supply lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReading {
    pub timestamp: DateTime<Utc>,
    pub flow_rate_lpm: f64,
}

// ---------------------------------------------------------------------------
// Hazard assessment
// ---------------------------------------------------------------------------

/// Outcome of classifying one sensor reading against the quality bands.
///
/// Derived fresh per reading and never mutated afterwards. `hazards` holds
/// one label per triggered channel, in channel order (temperature, pH,
/// turbidity, dissolved oxygen).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardAssessment {
    pub severity: Severity,
    pub hazards: Vec<&'static str>,
}

impl HazardAssessment {
    /// Human-readable summary, as stored in the hazard log and sent to the
    /// notification collaborator.
    pub fn description(&self) -> String {
        if self.hazards.is_empty() {
            "No hazards detected".to_string()
        } else {
            self.hazards.join(", ")
        }
    }
}

/// The persisted form of an assessment, accepted by the hazard-log store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardLogEntry {
    pub sensor_id: String,
    pub severity: Severity,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Farms and land units
// ---------------------------------------------------------------------------

/// Land-area units accepted by the unit converter. `Killa` and `Gaj` are
/// North-Indian land measures in common use on the farms this system serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Acre,
    Hectare,
    Killa,
    Gaj,
    #[serde(rename = "sqmeter")]
    SquareMeter,
}

impl AreaUnit {
    /// Case-insensitive lookup by the names the dashboard sends.
    /// Returns `None` for an unrecognized name; callers decide whether
    /// that is an error or a permissive default.
    pub fn from_name(name: &str) -> Option<AreaUnit> {
        match name.to_ascii_lowercase().as_str() {
            "acre" => Some(AreaUnit::Acre),
            "hectare" => Some(AreaUnit::Hectare),
            "killa" => Some(AreaUnit::Killa),
            "gaj" => Some(AreaUnit::Gaj),
            "sqmeter" => Some(AreaUnit::SquareMeter),
            _ => None,
        }
    }
}

/// Soil classes with distinct moisture-retention behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
}

impl SoilType {
    pub fn from_name(name: &str) -> Option<SoilType> {
        match name.to_ascii_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "loam" => Some(SoilType::Loam),
            "sandy" => Some(SoilType::Sandy),
            _ => None,
        }
    }

    /// Lowercase name, used as the key into the soil-factor table.
    pub fn name(self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Loam => "loam",
            SoilType::Sandy => "sandy",
        }
    }
}

/// Everything the water-requirement calculator needs to know about a farm.
/// Supplied by the caller per request; not persisted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmDescriptor {
    pub area: f64,
    pub area_unit: AreaUnit,
    pub soil_type: SoilType,
    pub crop_type: String,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Point-in-time conditions from the weather collaborator. Never cached by
/// the core; callers fetch a fresh snapshot per calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_1h_mm: f64,
}

// ---------------------------------------------------------------------------
// Pump run logs
// ---------------------------------------------------------------------------

/// One logged pump run. `power_rating` is a key into the power table
/// (e.g. "2hp"); an unknown key falls back to the 2 HP draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpRunLog {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub power_rating: String,
}

impl PumpRunLog {
    /// Date the run started, used for date-range filtering.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }
}

// ---------------------------------------------------------------------------
// Flow anomalies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    HighFlow,
    LowFlow,
}

/// A flow reading flagged as deviating from the window mean. Transient:
/// produced by the anomaly detector, discarded once the advisory is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowAnomaly {
    pub timestamp: DateTime<Utc>,
    pub flow_rate_lpm: f64,
    pub kind: AnomalyKind,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise in the monitoring core.
///
/// Unknown category keys (crop, soil, pump rating) are deliberately NOT
/// errors — they fall back to documented defaults for compatibility with
/// the dashboard's free-text inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed numeric, date, or clock input. Fails fast rather than
    /// producing silently wrong numbers.
    InvalidInput(String),
    /// A collaborator (weather provider, SMS gateway, store) failed.
    /// Surfaced to the caller unchanged — never retried, never suppressed.
    Upstream {
        collaborator: String,
        message: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CoreError::Upstream {
                collaborator,
                message,
            } => {
                write!(f, "Upstream failure ({}): {}", collaborator, message)
            }
        }
    }
}

impl std::error::Error for CoreError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
