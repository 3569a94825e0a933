//! Domain core of the agricultural water-monitoring dashboard backend.
//!
//! Everything here is a pure, synchronous computation over typed records
//! and immutable reference tables:
//! - water-quality hazard classification over four sensor channels,
//! - daily irrigation water requirements from crop, land, soil, and
//!   weather inputs,
//! - flow-rate anomaly detection with leakage advisories,
//! - pump energy/cost accounting and fleet supervision,
//! - water-usage and irrigation-schedule statistics for the dashboard.
//!
//! The core performs no I/O. Persistence, weather, and notification are
//! collaborators behind the traits in [`store`], [`weather`], and
//! [`hazard::notify`]; the HTTP layer that binds them lives outside this
//! crate.

pub mod analysis;
pub mod config;
pub mod hazard;
pub mod irrigation;
pub mod logging;
pub mod model;
pub mod pump;
pub mod store;
pub mod tables;
pub mod units;
pub mod weather;

// Re-exported so the HTTP layer and integration tests can use the core
// types without reaching into individual modules.
pub use config::ReferenceConfig;
pub use model::{
    AnomalyKind, AreaUnit, CoreError, FarmDescriptor, FlowAnomaly, FlowReading, HazardAssessment,
    HazardLogEntry, PumpRunLog, SensorReading, Severity, SoilType, WeatherSnapshot,
};
