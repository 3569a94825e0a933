//! Pump energy accounting and fleet supervision.
//!
//! Energy and cost come from logged run durations multiplied by the
//! nameplate draw and the flat tariff. Supervision covers the dashboard's
//! pump page: status transition rules, maintenance scheduling, and the
//! alert scan over the fleet.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ReferenceConfig;
use crate::model::{CoreError, PumpRunLog};
use crate::units::round2;

// ---------------------------------------------------------------------------
// Energy and cost
// ---------------------------------------------------------------------------

/// Aggregated electricity usage over a set of run logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpUsageSummary {
    pub total_hours: f64,
    pub energy_kwh: f64,
    pub cost_rs: f64,
}

/// Sums run durations and prices the energy at the given tariff.
///
/// `power_key` selects the pump's nameplate draw from the power table;
/// an unknown key silently uses the 2 HP draw (the fleet's most common
/// pump), matching the table fallback everywhere else.
pub fn usage_cost(
    logs: &[PumpRunLog],
    power_key: &str,
    tariff_per_kwh: f64,
    cfg: &ReferenceConfig,
) -> PumpUsageSummary {
    let total_hours: f64 = logs.iter().map(|log| log.duration_hours).sum();
    let energy_kwh = cfg.pump_power_kw(power_key) * total_hours;

    PumpUsageSummary {
        total_hours,
        energy_kwh: round2(energy_kwh),
        cost_rs: round2(energy_kwh * tariff_per_kwh),
    }
}

/// Parses a dashboard date range ("YYYY-MM-DD" endpoints, inclusive).
///
/// Fails fast on malformed dates and on an inverted range — either would
/// otherwise produce a silently wrong (usually empty) billing figure.
pub fn parse_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end < start {
        return Err(CoreError::InvalidInput(format!(
            "date range ends ({}) before it starts ({})",
            end, start
        )));
    }
    Ok((start, end))
}

fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidInput(format!("date '{}' is not YYYY-MM-DD", value)))
}

/// Filters logs to runs that started inside the range, inclusive.
pub fn logs_in_range(logs: &[PumpRunLog], from: NaiveDate, to: NaiveDate) -> Vec<PumpRunLog> {
    logs.iter()
        .filter(|log| {
            let date = log.start_date();
            date >= from && date <= to
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpStatus {
    Running,
    Idle,
    Maintenance,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
    Maintenance,
}

/// Whether a control action is legal from the current status.
///
/// Start only from idle, stop only from running; maintenance can begin
/// from any state except an ongoing maintenance.
pub fn transition_allowed(current: PumpStatus, action: ControlAction) -> bool {
    match action {
        ControlAction::Start => current == PumpStatus::Idle,
        ControlAction::Stop => current == PumpStatus::Running,
        ControlAction::Maintenance => matches!(
            current,
            PumpStatus::Idle | PumpStatus::Running | PumpStatus::Error
        ),
    }
}

// ---------------------------------------------------------------------------
// Maintenance scheduling
// ---------------------------------------------------------------------------

pub fn next_maintenance(last_maintenance: NaiveDate, interval_days: u32) -> NaiveDate {
    last_maintenance + Duration::days(interval_days as i64)
}

// ---------------------------------------------------------------------------
// Fleet alerts
// ---------------------------------------------------------------------------

/// Motor temperature above this is outside normal operation.
const MOTOR_TEMP_WARNING_C: f64 = 60.0;
/// A running pump below this efficiency deserves an inspection.
const LOW_EFFICIENCY_PCT: f64 = 85.0;
/// Start warning this many days before scheduled maintenance.
const MAINTENANCE_DUE_DAYS: i64 = 7;

/// Live state of one pump, as the telemetry collaborator reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpDescriptor {
    pub name: String,
    pub status: PumpStatus,
    pub motor_temperature_c: f64,
    pub efficiency_pct: f64,
    pub next_maintenance: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpAlertKind {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpAlert {
    pub kind: PumpAlertKind,
    pub pump_name: String,
    pub title: String,
    pub message: String,
}

/// Scans the fleet for conditions the dashboard should surface.
///
/// One pump can raise several alerts at once (an overheating pump that is
/// also overdue for maintenance raises both).
pub fn pump_alerts(pumps: &[PumpDescriptor], today: NaiveDate) -> Vec<PumpAlert> {
    let mut alerts = Vec::new();

    for pump in pumps {
        if pump.status == PumpStatus::Error {
            alerts.push(PumpAlert {
                kind: PumpAlertKind::Error,
                pump_name: pump.name.clone(),
                title: format!("{} Error", pump.name),
                message: "Pump has stopped unexpectedly. Check voltage and current readings."
                    .to_string(),
            });
        }

        if pump.motor_temperature_c > MOTOR_TEMP_WARNING_C {
            alerts.push(PumpAlert {
                kind: PumpAlertKind::Warning,
                pump_name: pump.name.clone(),
                title: "High Temperature Alert".to_string(),
                message: format!(
                    "{} motor is at {:.0} °C. Normal operation is below 55 °C.",
                    pump.name, pump.motor_temperature_c
                ),
            });
        }

        let days_until_maintenance = (pump.next_maintenance - today).num_days();
        if days_until_maintenance < MAINTENANCE_DUE_DAYS && pump.status != PumpStatus::Maintenance {
            alerts.push(PumpAlert {
                kind: PumpAlertKind::Warning,
                pump_name: pump.name.clone(),
                title: "Maintenance Due Soon".to_string(),
                message: format!(
                    "{} maintenance scheduled for {}.",
                    pump.name,
                    pump.next_maintenance.format("%d %b %Y")
                ),
            });
        }

        if pump.status == PumpStatus::Running && pump.efficiency_pct < LOW_EFFICIENCY_PCT {
            alerts.push(PumpAlert {
                kind: PumpAlertKind::Info,
                pump_name: pump.name.clone(),
                title: "Low Efficiency".to_string(),
                message: format!(
                    "{} operating at {:.0}% efficiency. Consider inspection.",
                    pump.name, pump.efficiency_pct
                ),
            });
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn run_log(day: u32, duration_hours: f64) -> PumpRunLog {
        let start = Utc.with_ymd_and_hms(2024, 6, day, 6, 0, 0).unwrap();
        PumpRunLog {
            start_time: start,
            end_time: start + Duration::minutes((duration_hours * 60.0) as i64),
            duration_hours,
            power_rating: "2hp".to_string(),
        }
    }

    #[test]
    fn test_usage_cost_for_a_2hp_pump() {
        let cfg = ReferenceConfig::default();
        let logs = vec![run_log(1, 2.0), run_log(2, 3.0)];

        let summary = usage_cost(&logs, "2hp", 8.50, &cfg);
        assert_eq!(summary.total_hours, 5.0);
        // 1.492 kW × 5 h.
        assert_eq!(summary.energy_kwh, 7.46);
        // 7.46 kWh × 8.50 Rs.
        assert_eq!(summary.cost_rs, 63.41);
    }

    #[test]
    fn test_unknown_power_rating_bills_as_2hp() {
        let cfg = ReferenceConfig::default();
        let logs = vec![run_log(1, 2.0), run_log(2, 3.0)];

        let known = usage_cost(&logs, "2hp", 8.50, &cfg);
        let unknown = usage_cost(&logs, "12hp", 8.50, &cfg);
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_usage_cost_of_no_logs_is_zero() {
        let cfg = ReferenceConfig::default();
        let summary = usage_cost(&[], "5hp", 8.50, &cfg);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.energy_kwh, 0.0);
        assert_eq!(summary.cost_rs, 0.0);
    }

    #[test]
    fn test_parse_date_range_accepts_iso_dates() {
        let (from, to) = parse_date_range("2024-06-01", "2024-06-30").unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_parse_date_range_rejects_malformed_dates() {
        assert!(matches!(
            parse_date_range("01/06/2024", "2024-06-30"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_date_range("2024-06-01", "2024-13-01"),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_date_range_rejects_inverted_range() {
        let err = parse_date_range("2024-06-30", "2024-06-01").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.to_string().contains("before it starts"));
    }

    #[test]
    fn test_logs_in_range_is_inclusive_of_both_endpoints() {
        let logs = vec![run_log(1, 2.0), run_log(15, 1.0), run_log(30, 3.0)];
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        assert_eq!(logs_in_range(&logs, from, to).len(), 3);

        let mid = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let only_mid = logs_in_range(&logs, mid, mid);
        assert_eq!(only_mid.len(), 1);
        assert_eq!(only_mid[0].duration_hours, 1.0);
    }

    #[test]
    fn test_transition_rules() {
        assert!(transition_allowed(PumpStatus::Idle, ControlAction::Start));
        assert!(!transition_allowed(PumpStatus::Running, ControlAction::Start));
        assert!(!transition_allowed(PumpStatus::Error, ControlAction::Start));

        assert!(transition_allowed(PumpStatus::Running, ControlAction::Stop));
        assert!(!transition_allowed(PumpStatus::Idle, ControlAction::Stop));

        assert!(transition_allowed(PumpStatus::Idle, ControlAction::Maintenance));
        assert!(transition_allowed(PumpStatus::Running, ControlAction::Maintenance));
        assert!(transition_allowed(PumpStatus::Error, ControlAction::Maintenance));
        assert!(!transition_allowed(
            PumpStatus::Maintenance,
            ControlAction::Maintenance
        ));
    }

    #[test]
    fn test_next_maintenance_adds_the_interval() {
        let last = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            next_maintenance(last, 90),
            NaiveDate::from_ymd_opt(2024, 8, 30).unwrap()
        );
    }

    fn pump(
        name: &str,
        status: PumpStatus,
        motor_temperature_c: f64,
        efficiency_pct: f64,
        next_maintenance: NaiveDate,
    ) -> PumpDescriptor {
        PumpDescriptor {
            name: name.to_string(),
            status,
            motor_temperature_c,
            efficiency_pct,
            next_maintenance,
        }
    }

    #[test]
    fn test_fleet_alert_scan() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let far = today + Duration::days(60);
        let soon = today + Duration::days(3);

        let fleet = vec![
            // Healthy: no alerts.
            pump("Pump-A01", PumpStatus::Running, 45.0, 92.0, far),
            // Faulted: error alert.
            pump("Pump-F06", PumpStatus::Error, 68.0, 0.0, far),
            // Running hot and inefficiently, maintenance close: three alerts.
            pump("Pump-E05", PumpStatus::Running, 62.0, 80.0, soon),
            // Under maintenance already: due-soon suppressed.
            pump("Pump-D04", PumpStatus::Maintenance, 25.0, 0.0, soon),
        ];

        let alerts = pump_alerts(&fleet, today);

        let for_pump = |name: &str| -> Vec<&PumpAlert> {
            alerts.iter().filter(|a| a.pump_name == name).collect()
        };

        assert!(for_pump("Pump-A01").is_empty());

        // F06 is over 60 °C as well as faulted.
        let f06 = for_pump("Pump-F06");
        assert_eq!(f06.len(), 2);
        assert_eq!(f06[0].kind, PumpAlertKind::Error);

        let e05 = for_pump("Pump-E05");
        assert_eq!(e05.len(), 3);
        assert!(e05.iter().any(|a| a.title == "High Temperature Alert"));
        assert!(e05.iter().any(|a| a.title == "Maintenance Due Soon"));
        assert!(e05.iter().any(|a| a.kind == PumpAlertKind::Info));

        assert!(for_pump("Pump-D04").is_empty());
    }

    #[test]
    fn test_temperature_exactly_at_threshold_is_not_an_alert() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let far = today + Duration::days(60);
        let fleet = vec![pump("Pump-B02", PumpStatus::Running, 60.0, 90.0, far)];
        assert!(pump_alerts(&fleet, today).is_empty());
    }
}
