//! Flow-rate anomaly detection over a recent reading window.
//!
//! A reading far from the window mean points at plumbing trouble: well
//! above it, a burst pipe or open joint; well below it, a blockage or a
//! pinhole leak starving the line. The caller picks the window (the
//! leakage endpoint uses the last 24 hours) — this module just scans it.

use serde::Serialize;

use crate::model::{AnomalyKind, FlowAnomaly, FlowReading};

/// Deviation factors around the window mean. Strictly outside
/// [0.5×mean, 1.5×mean] counts as anomalous.
const HIGH_FLOW_FACTOR: f64 = 1.5;
const LOW_FLOW_FACTOR: f64 = 0.5;

/// Arithmetic mean flow over the window. `None` for an empty window.
pub fn mean_flow(readings: &[FlowReading]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let total: f64 = readings.iter().map(|r| r.flow_rate_lpm).sum();
    Some(total / readings.len() as f64)
}

/// Flags every reading deviating more than ±50 % from the window mean.
///
/// An empty window yields no anomalies (and no division by zero). The
/// mean includes the anomalous readings themselves — one extreme spike
/// in a small window drags the mean toward itself, which is accepted
/// behavior for the short windows the dashboard uses.
pub fn detect_flow_anomalies(readings: &[FlowReading]) -> Vec<FlowAnomaly> {
    let Some(mean) = mean_flow(readings) else {
        return Vec::new();
    };

    readings
        .iter()
        .filter_map(|reading| {
            let kind = if reading.flow_rate_lpm > mean * HIGH_FLOW_FACTOR {
                Some(AnomalyKind::HighFlow)
            } else if reading.flow_rate_lpm < mean * LOW_FLOW_FACTOR {
                Some(AnomalyKind::LowFlow)
            } else {
                None
            };
            kind.map(|kind| FlowAnomaly {
                timestamp: reading.timestamp,
                flow_rate_lpm: reading.flow_rate_lpm,
                kind,
            })
        })
        .collect()
}

/// Fixed advisory per anomaly kind. Pure lookup, no state.
pub fn recommendation(kind: AnomalyKind) -> &'static str {
    match kind {
        AnomalyKind::HighFlow => {
            "Possible pipe burst or major leak detected. Check pipes and connections."
        }
        AnomalyKind::LowFlow => {
            "Possible blockage or minor leak detected. Check for clogged filters or damaged pipes."
        }
    }
}

/// The leakage-check payload: anomalies plus one advisory per anomaly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeakageReport {
    pub has_leakage: bool,
    pub anomalies: Vec<FlowAnomaly>,
    pub recommendations: Vec<&'static str>,
}

/// Runs the detector over a window and bundles the result for the
/// dashboard.
pub fn leakage_report(readings: &[FlowReading]) -> LeakageReport {
    let anomalies = detect_flow_anomalies(readings);
    let recommendations = anomalies.iter().map(|a| recommendation(a.kind)).collect();
    LeakageReport {
        has_leakage: !anomalies.is_empty(),
        anomalies,
        recommendations,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
