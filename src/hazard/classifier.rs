//! Water-quality threshold classification.
//!
//! Each of the four sensor channels has an independent warning band and a
//! critical band. Every channel is evaluated on every call, most-severe
//! band first, so a channel contributes at most one label; the overall
//! severity is the maximum tier any channel reached. This ranked reduction
//! makes the result independent of channel evaluation order — no channel
//! can mask another, and escalation never depends on which check ran
//! first.

use crate::model::{HazardAssessment, SensorReading, Severity};

// ---------------------------------------------------------------------------
// Quality bands
// ---------------------------------------------------------------------------

/// Water temperature bands, °C. Irrigation water above 30 °C stresses
/// roots; above 35 °C it damages them.
const TEMP_WARNING_ABOVE_C: f64 = 30.0;
const TEMP_CRITICAL_ABOVE_C: f64 = 35.0;

/// pH bands. The warning band brackets the crop-safe range; outside the
/// critical band, nutrient uptake fails outright.
const PH_WARNING_LOW: f64 = 6.5;
const PH_WARNING_HIGH: f64 = 8.5;
const PH_CRITICAL_LOW: f64 = 6.0;
const PH_CRITICAL_HIGH: f64 = 9.0;

/// Turbidity bands, NTU.
const TURBIDITY_WARNING_ABOVE_NTU: f64 = 5.0;
const TURBIDITY_CRITICAL_ABOVE_NTU: f64 = 10.0;

/// Dissolved-oxygen bands, mg/L. Low DO in the source water indicates
/// organic contamination.
const DO_WARNING_BELOW_MG_L: f64 = 5.0;
const DO_CRITICAL_BELOW_MG_L: f64 = 3.0;

// ---------------------------------------------------------------------------
// Per-channel checks
// ---------------------------------------------------------------------------

// Each check tests its critical band before its warning band and returns
// at most one finding, so a critically-hot reading yields only the
// critical label rather than both.

fn check_temperature(temperature_c: f64) -> Option<(Severity, &'static str)> {
    if temperature_c > TEMP_CRITICAL_ABOVE_C {
        Some((Severity::Critical, "Critical temperature"))
    } else if temperature_c > TEMP_WARNING_ABOVE_C {
        Some((Severity::Warning, "High temperature"))
    } else {
        None
    }
}

fn check_ph(ph_level: f64) -> Option<(Severity, &'static str)> {
    if ph_level < PH_CRITICAL_LOW || ph_level > PH_CRITICAL_HIGH {
        Some((Severity::Critical, "Critical pH level"))
    } else if ph_level < PH_WARNING_LOW || ph_level > PH_WARNING_HIGH {
        Some((Severity::Warning, "Abnormal pH level"))
    } else {
        None
    }
}

fn check_turbidity(turbidity_ntu: f64) -> Option<(Severity, &'static str)> {
    if turbidity_ntu > TURBIDITY_CRITICAL_ABOVE_NTU {
        Some((Severity::Critical, "Critical turbidity"))
    } else if turbidity_ntu > TURBIDITY_WARNING_ABOVE_NTU {
        Some((Severity::Warning, "High turbidity"))
    } else {
        None
    }
}

fn check_dissolved_oxygen(dissolved_oxygen_mg_l: f64) -> Option<(Severity, &'static str)> {
    if dissolved_oxygen_mg_l < DO_CRITICAL_BELOW_MG_L {
        Some((Severity::Critical, "Critical dissolved oxygen"))
    } else if dissolved_oxygen_mg_l < DO_WARNING_BELOW_MG_L {
        Some((Severity::Warning, "Low dissolved oxygen"))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies one sensor reading against the quality bands.
///
/// Pure and idempotent: the same reading always yields the same severity
/// and the same labels in the same order. The classifier never notifies
/// anyone — dispatching Warning/Critical results to the notification
/// collaborator is the caller's job (see [`crate::hazard::notify`]).
pub fn classify(reading: &SensorReading) -> HazardAssessment {
    let findings = [
        check_temperature(reading.temperature_c),
        check_ph(reading.ph_level),
        check_turbidity(reading.turbidity_ntu),
        check_dissolved_oxygen(reading.dissolved_oxygen_mg_l),
    ];

    let mut severity = Severity::Safe;
    let mut hazards = Vec::new();
    for (tier, label) in findings.into_iter().flatten() {
        severity = severity.max(tier);
        hazards.push(label);
    }

    HazardAssessment { severity, hazards }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
