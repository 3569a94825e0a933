//! Persistence seams and the typed in-memory store behind them.
//!
//! The calculators never talk to a database. They consume and produce
//! records through the traits here; the excluded HTTP layer binds those
//! traits to its real storage. `MemoryStore` is the typed in-memory
//! implementation used by tests, demos, and development replay.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::logging::{self, Component};
use crate::model::{CoreError, HazardLogEntry, PumpRunLog, SensorReading};

// ---------------------------------------------------------------------------
// Storage traits
// ---------------------------------------------------------------------------

/// Sensor-reading persistence.
pub trait ReadingStore {
    fn insert_reading(&mut self, reading: SensorReading) -> Result<(), CoreError>;

    /// Readings at or after `since`, oldest first.
    fn readings_since(&self, since: DateTime<Utc>) -> Result<Vec<SensorReading>, CoreError>;

    /// The most recent reading from one sensor, if any.
    fn latest_for(&self, sensor_id: &str) -> Result<Option<SensorReading>, CoreError>;
}

/// Pump run-log persistence.
pub trait PumpLogStore {
    fn insert_pump_log(&mut self, log: PumpRunLog) -> Result<(), CoreError>;

    /// Runs started between `from` and `to`, inclusive.
    fn pump_logs_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PumpRunLog>, CoreError>;
}

/// Hazard-log persistence.
pub trait HazardLogStore {
    fn record_hazard(&mut self, entry: HazardLogEntry) -> Result<(), CoreError>;

    /// The most recent entries, newest first, at most `limit`.
    fn recent_hazards(&self, limit: usize) -> Result<Vec<HazardLogEntry>, CoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Typed in-memory implementation of all three storage traits.
///
/// Keeps insertion order; queries scan. Good for the data volumes of
/// tests and demos, not a production store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    readings: Vec<SensorReading>,
    pump_logs: Vec<PumpRunLog>,
    hazards: Vec<HazardLogEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ReadingStore for MemoryStore {
    fn insert_reading(&mut self, reading: SensorReading) -> Result<(), CoreError> {
        self.readings.push(reading);
        Ok(())
    }

    fn readings_since(&self, since: DateTime<Utc>) -> Result<Vec<SensorReading>, CoreError> {
        let mut readings: Vec<_> = self
            .readings
            .iter()
            .filter(|r| r.timestamp >= since)
            .cloned()
            .collect();
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }

    fn latest_for(&self, sensor_id: &str) -> Result<Option<SensorReading>, CoreError> {
        Ok(self
            .readings
            .iter()
            .filter(|r| r.sensor_id == sensor_id)
            .max_by_key(|r| r.timestamp)
            .cloned())
    }
}

impl PumpLogStore for MemoryStore {
    fn insert_pump_log(&mut self, log: PumpRunLog) -> Result<(), CoreError> {
        self.pump_logs.push(log);
        Ok(())
    }

    fn pump_logs_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PumpRunLog>, CoreError> {
        Ok(self
            .pump_logs
            .iter()
            .filter(|log| {
                let date = log.start_date();
                date >= from && date <= to
            })
            .cloned()
            .collect())
    }
}

impl HazardLogStore for MemoryStore {
    fn record_hazard(&mut self, entry: HazardLogEntry) -> Result<(), CoreError> {
        self.hazards.push(entry);
        Ok(())
    }

    fn recent_hazards(&self, limit: usize) -> Result<Vec<HazardLogEntry>, CoreError> {
        let mut hazards = self.hazards.clone();
        hazards.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        hazards.truncate(limit);
        Ok(hazards)
    }
}

// ---------------------------------------------------------------------------
// Development replay
// ---------------------------------------------------------------------------

/// Serves historical readings as if they were current.
///
/// When live sensors are unavailable (bench development, demo rigs),
/// replay data from `days_offset` days ago: the "current" window is the
/// last two update intervals before the shifted now.
#[derive(Debug, Clone, Copy)]
pub struct ReplayWindow {
    /// Simulate data as if it's this many days in the past.
    pub days_offset: i64,
    /// Sensor update interval in seconds (default: 900 = 15 minutes).
    pub update_interval_secs: i64,
}

impl ReplayWindow {
    pub fn new(days_offset: i64) -> Self {
        ReplayWindow {
            days_offset,
            update_interval_secs: 900,
        }
    }

    /// Fetches the readings that would be "current" at the shifted time.
    pub fn simulated_current<S: ReadingStore>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> Result<Vec<SensorReading>, CoreError> {
        let simulated_now = now - Duration::days(self.days_offset);
        let window_start = simulated_now - Duration::seconds(self.update_interval_secs * 2);

        let readings: Vec<_> = store
            .readings_since(window_start)?
            .into_iter()
            .filter(|r| r.timestamp <= simulated_now)
            .collect();

        logging::debug(
            Component::Store,
            None,
            &format!(
                "replay window {} .. {} served {} readings",
                window_start, simulated_now,
                readings.len()
            ),
        );
        Ok(readings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use chrono::TimeZone;

    fn reading_at(sensor_id: &str, hour: u32, minute: u32) -> SensorReading {
        SensorReading {
            sensor_id: sensor_id.to_string(),
            temperature_c: 25.0,
            ph_level: 7.0,
            turbidity_ntu: 2.0,
            dissolved_oxygen_mg_l: 6.0,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_readings_since_filters_and_sorts() {
        let mut store = MemoryStore::new();
        // Inserted out of order on purpose.
        store.insert_reading(reading_at("well-7", 10, 0)).unwrap();
        store.insert_reading(reading_at("well-7", 8, 0)).unwrap();
        store.insert_reading(reading_at("well-7", 9, 0)).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let readings = store.readings_since(since).unwrap();

        assert_eq!(readings.len(), 2);
        assert!(readings[0].timestamp < readings[1].timestamp);
    }

    #[test]
    fn test_latest_for_picks_the_newest_per_sensor() {
        let mut store = MemoryStore::new();
        store.insert_reading(reading_at("well-7", 8, 0)).unwrap();
        store.insert_reading(reading_at("well-7", 10, 0)).unwrap();
        store.insert_reading(reading_at("canal-2", 11, 0)).unwrap();

        let latest = store.latest_for("well-7").unwrap().unwrap();
        assert_eq!(latest.timestamp.format("%H:%M").to_string(), "10:00");
        assert!(store.latest_for("well-99").unwrap().is_none());
    }

    #[test]
    fn test_pump_logs_between_is_inclusive() {
        let mut store = MemoryStore::new();
        for day in [1, 15, 30] {
            let start = Utc.with_ymd_and_hms(2024, 6, day, 6, 0, 0).unwrap();
            store
                .insert_pump_log(PumpRunLog {
                    start_time: start,
                    end_time: start + Duration::hours(2),
                    duration_hours: 2.0,
                    power_rating: "2hp".to_string(),
                })
                .unwrap();
        }

        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(store.pump_logs_between(from, to).unwrap().len(), 2);
    }

    #[test]
    fn test_recent_hazards_returns_newest_first_up_to_limit() {
        let mut store = MemoryStore::new();
        for hour in 8..12 {
            store
                .record_hazard(HazardLogEntry {
                    sensor_id: "well-7".to_string(),
                    severity: Severity::Warning,
                    description: format!("entry at {}:00", hour),
                    timestamp: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
                })
                .unwrap();
        }

        let recent = store.recent_hazards(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "entry at 11:00");
        assert_eq!(recent[1].description, "entry at 10:00");
    }

    #[test]
    fn test_replay_serves_the_shifted_window() {
        let mut store = MemoryStore::new();
        // Data from June 1st; "now" is June 8th, replay offset 7 days.
        store.insert_reading(reading_at("well-7", 7, 0)).unwrap(); // too old
        store.insert_reading(reading_at("well-7", 7, 45)).unwrap();
        store.insert_reading(reading_at("well-7", 8, 0)).unwrap();
        store.insert_reading(reading_at("well-7", 9, 0)).unwrap(); // after shifted now

        let now = Utc.with_ymd_and_hms(2024, 6, 8, 8, 0, 0).unwrap();
        let replay = ReplayWindow::new(7);
        let current = replay.simulated_current(&store, now).unwrap();

        // Shifted now is June 1st 08:00; the window is the 30 minutes
        // before it.
        assert_eq!(current.len(), 2);
        assert_eq!(current[0].timestamp.format("%H:%M").to_string(), "07:45");
        assert_eq!(current[1].timestamp.format("%H:%M").to_string(), "08:00");
    }
}
