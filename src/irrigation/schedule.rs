//! Irrigation schedule records and their statistics.
//!
//! Schedules are authored by farm staff through the dashboard and live in
//! the persistence collaborator; this module owns their typed form and
//! the aggregate numbers the dashboard's schedule page shows.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Schedule records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    InProgress,
    Completed,
}

impl ScheduleStatus {
    /// Case-insensitive lookup by the dashboard's display names.
    pub fn from_name(name: &str) -> Option<ScheduleStatus> {
        match name.to_ascii_lowercase().as_str() {
            "pending" => Some(ScheduleStatus::Pending),
            "in progress" | "in_progress" => Some(ScheduleStatus::InProgress),
            "completed" => Some(ScheduleStatus::Completed),
            _ => None,
        }
    }
}

/// One planned or executed irrigation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationSchedule {
    pub crop_type: String,
    pub field_location: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub water_used_l: f64,
    pub status: ScheduleStatus,
    pub worker: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// One day's schedule counts. Water is summed over completed runs only —
/// pending and in-progress figures are plans, not consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub total_schedules: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub total_water_used_l: f64,
}

/// All-time schedule counts for the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_schedules: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub total_water_used_l: f64,
    pub unique_fields: usize,
    pub unique_crops: usize,
}

pub fn day_stats(schedules: &[IrrigationSchedule], date: NaiveDate) -> DayStats {
    let today: Vec<_> = schedules.iter().filter(|s| s.date == date).collect();

    DayStats {
        date,
        total_schedules: today.len(),
        completed: count_status(&today, ScheduleStatus::Completed),
        pending: count_status(&today, ScheduleStatus::Pending),
        in_progress: count_status(&today, ScheduleStatus::InProgress),
        total_water_used_l: completed_water(&today),
    }
}

pub fn summary_stats(schedules: &[IrrigationSchedule]) -> SummaryStats {
    let all: Vec<_> = schedules.iter().collect();

    let mut fields: Vec<&str> = schedules.iter().map(|s| s.field_location.as_str()).collect();
    fields.sort_unstable();
    fields.dedup();

    let mut crops: Vec<&str> = schedules.iter().map(|s| s.crop_type.as_str()).collect();
    crops.sort_unstable();
    crops.dedup();

    SummaryStats {
        total_schedules: all.len(),
        completed: count_status(&all, ScheduleStatus::Completed),
        pending: count_status(&all, ScheduleStatus::Pending),
        in_progress: count_status(&all, ScheduleStatus::InProgress),
        total_water_used_l: completed_water(&all),
        unique_fields: fields.len(),
        unique_crops: crops.len(),
    }
}

fn count_status(schedules: &[&IrrigationSchedule], status: ScheduleStatus) -> usize {
    schedules.iter().filter(|s| s.status == status).count()
}

fn completed_water(schedules: &[&IrrigationSchedule]) -> f64 {
    schedules
        .iter()
        .filter(|s| s.status == ScheduleStatus::Completed)
        .map(|s| s.water_used_l)
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
