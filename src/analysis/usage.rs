//! Water-usage records and the dashboard aggregates derived from them.
//!
//! A usage record is one irrigation run on one field: how much water went
//! out, over which clock window, from which source. The derived fields
//! (duration, cost, optimal/over/under status) are computed here so every
//! consumer sees the same numbers, and the dashboard's stat cards are all
//! linear scans over a record slice.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::ReferenceConfig;
use crate::model::CoreError;
use crate::units::{round1, round2};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Where the irrigation water came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterSource {
    Tank,
    Borewell,
    Rainwater,
    Canal,
}

/// How a run's volume compares to the crop's daily band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageStatus {
    Optimal,
    Overused,
    Underused,
}

/// One irrigation run with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterUsageRecord {
    pub field_name: String,
    pub crop_type: String,
    pub date: NaiveDate,
    pub water_used_l: f64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub flow_rate_lpm: f64,
    pub source: WaterSource,
    pub status: UsageStatus,
    pub cost_rs: f64,
}

impl WaterUsageRecord {
    /// Builds a record from raw dashboard input, parsing the clock times
    /// and computing the derived fields.
    #[allow(clippy::too_many_arguments)]
    pub fn derive(
        field_name: &str,
        crop_type: &str,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        water_used_l: f64,
        flow_rate_lpm: f64,
        source: WaterSource,
        cfg: &ReferenceConfig,
    ) -> Result<WaterUsageRecord, CoreError> {
        Ok(WaterUsageRecord {
            field_name: field_name.to_string(),
            crop_type: crop_type.to_string(),
            date,
            water_used_l,
            start_time: parse_clock(start_time)?,
            end_time: parse_clock(end_time)?,
            flow_rate_lpm,
            source,
            status: classify_usage(water_used_l, crop_type, cfg),
            cost_rs: usage_cost_rs(water_used_l, cfg),
        })
    }

    /// Run length as the dashboard shows it, e.g. "2h 30m".
    pub fn duration(&self) -> String {
        format_duration(duration_minutes(self.start_time, self.end_time))
    }
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Parses a dashboard clock string ("HH:MM"). Malformed input fails fast —
/// a silently-wrong duration would corrupt every downstream figure.
pub fn parse_clock(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| CoreError::InvalidInput(format!("clock time '{}' is not HH:MM", value)))
}

/// Minutes between two clock times on the same shift. An end before the
/// start means the run crossed midnight.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes + 24 * 60
    } else {
        minutes
    }
}

pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Water cost at the flat tariff, rupees to 2 decimals.
pub fn usage_cost_rs(water_used_l: f64, cfg: &ReferenceConfig) -> f64 {
    round2(water_used_l * cfg.water_rate_per_liter)
}

/// Classifies a run's volume against the crop's daily band. Crops without
/// a band are always optimal.
pub fn classify_usage(water_used_l: f64, crop_type: &str, cfg: &ReferenceConfig) -> UsageStatus {
    match cfg.usage_band_l(crop_type) {
        Some((min, _)) if water_used_l < min => UsageStatus::Underused,
        Some((_, max)) if water_used_l > max => UsageStatus::Overused,
        _ => UsageStatus::Optimal,
    }
}

// ---------------------------------------------------------------------------
// Dashboard aggregates
// ---------------------------------------------------------------------------

/// The dashboard's headline stat cards for one day, with day-over-day
/// trends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_water_today_l: f64,
    pub target_water_l: f64,
    pub avg_usage_per_field_l: f64,
    pub total_cost_rs: f64,
    pub efficiency_pct: f64,
    pub water_trend_pct: f64,
    pub cost_trend_pct: f64,
    pub efficiency_trend_pct: f64,
}

/// Daily usage totals for the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageTrend {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

/// Usage totals grouped by crop for the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageDistribution {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Computes the headline stats for `today` against the previous day.
///
/// Trends are percent change; a day with no records contributes zero
/// trend rather than a division by zero. Efficiency is the share of
/// records classified optimal.
pub fn dashboard_stats(
    records: &[WaterUsageRecord],
    today: NaiveDate,
    cfg: &ReferenceConfig,
) -> DashboardStats {
    let yesterday = today - Duration::days(1);
    let today_records: Vec<_> = records.iter().filter(|r| r.date == today).collect();
    let yesterday_records: Vec<_> = records.iter().filter(|r| r.date == yesterday).collect();

    let total_water_today: f64 = today_records.iter().map(|r| r.water_used_l).sum();
    let total_cost: f64 = today_records.iter().map(|r| r.cost_rs).sum();
    let total_water_yesterday: f64 = yesterday_records.iter().map(|r| r.water_used_l).sum();
    let total_cost_yesterday: f64 = yesterday_records.iter().map(|r| r.cost_rs).sum();

    let efficiency = optimal_share_pct(&today_records);
    let yesterday_efficiency = optimal_share_pct(&yesterday_records);

    let mut fields: Vec<&str> = today_records.iter().map(|r| r.field_name.as_str()).collect();
    fields.sort_unstable();
    fields.dedup();
    let field_count = fields.len().max(1);

    DashboardStats {
        total_water_today_l: round2(total_water_today),
        target_water_l: cfg.daily_water_target_l,
        avg_usage_per_field_l: round2(total_water_today / field_count as f64),
        total_cost_rs: round2(total_cost),
        efficiency_pct: round1(efficiency),
        water_trend_pct: round1(percent_change(total_water_today, total_water_yesterday)),
        cost_trend_pct: round1(percent_change(total_cost, total_cost_yesterday)),
        efficiency_trend_pct: round1(efficiency - yesterday_efficiency),
    }
}

/// Per-day totals for the last `days` days, oldest first, including days
/// with no usage.
pub fn usage_trend(records: &[WaterUsageRecord], today: NaiveDate, days: u32) -> UsageTrend {
    let mut dates = Vec::new();
    let mut values = Vec::new();

    for offset in (0..days as i64).rev() {
        let date = today - Duration::days(offset);
        let total: f64 = records
            .iter()
            .filter(|r| r.date == date)
            .map(|r| r.water_used_l)
            .sum();
        dates.push(date.format("%Y-%m-%d").to_string());
        values.push(round2(total));
    }

    UsageTrend { dates, values }
}

/// Usage totals grouped by crop, in first-seen order.
pub fn usage_distribution(records: &[WaterUsageRecord]) -> UsageDistribution {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for record in records {
        match totals.iter_mut().find(|(crop, _)| *crop == record.crop_type) {
            Some((_, total)) => *total += record.water_used_l,
            None => totals.push((record.crop_type.clone(), record.water_used_l)),
        }
    }

    UsageDistribution {
        labels: totals.iter().map(|(crop, _)| crop.clone()).collect(),
        values: totals.iter().map(|(_, total)| round2(*total)).collect(),
    }
}

fn optimal_share_pct(records: &[&WaterUsageRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let optimal = records
        .iter()
        .filter(|r| r.status == UsageStatus::Optimal)
        .count();
    optimal as f64 / records.len() as f64 * 100.0
}

fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
