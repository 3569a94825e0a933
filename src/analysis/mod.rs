/// Derived analytics over stored monitoring data.
///
/// This module provides the linear-scan analyses the dashboard surfaces.
/// Anything heavier (regressions, seasonal forecasting) is handled by
/// external notebooks reading from the curated store.
///
/// Submodules:
/// - `flow` — flow-rate anomaly detection and leakage advisories.
/// - `usage` — water-usage records, derived fields, and dashboard
///   aggregates.

pub mod flow;
pub mod usage;
