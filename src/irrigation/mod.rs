/// Irrigation planning for monitored farms.
///
/// Submodules:
/// - `requirement` — daily water requirement from crop, land, soil, and
///   weather inputs.
/// - `schedule` — irrigation schedule records and their daily/overall
///   statistics.

pub mod requirement;
pub mod schedule;
