/// Structured logging for the water-monitoring core.
///
/// Provides context-rich logging with component tags, entity identifiers
/// (sensor, pump, farm), timestamps, and severity levels. Supports both
/// console output and file-based logging for daemon operations.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::CoreError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Component Tags
// ---------------------------------------------------------------------------

/// Which part of the system a log line concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Sensor,
    Weather,
    Irrigation,
    Pump,
    Alert,
    Store,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Sensor => write!(f, "SENSOR"),
            Component::Weather => write!(f, "WX"),
            Component::Irrigation => write!(f, "IRRIG"),
            Component::Pump => write!(f, "PUMP"),
            Component::Alert => write!(f, "ALERT"),
            Component::Store => write!(f, "STORE"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - provider throttling, scheduled maintenance windows
    Expected,
    /// Unexpected failure - indicates service degradation or configuration issue
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger {
            min_level,
            log_file,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, component: Component, entity_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let entity_part = entity_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, component, entity_part, message
        );

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message
pub fn info(component: Component, entity_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, component, entity_id, message);
    }
}

/// Log a warning message
pub fn warn(component: Component, entity_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, component, entity_id, message);
    }
}

/// Log an error message
pub fn error(component: Component, entity_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, component, entity_id, message);
    }
}

/// Log a debug message
pub fn debug(component: Component, entity_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, component, entity_id, message);
    }
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a collaborator failure based on the error content.
pub fn classify_upstream_failure(err: &CoreError) -> FailureType {
    match err {
        // Malformed input reaching a collaborator call is a caller bug,
        // never a routine condition.
        CoreError::InvalidInput(_) => FailureType::Unexpected,
        CoreError::Upstream { message, .. } => {
            let message = message.to_lowercase();
            // Providers throttle routinely; the daemon retries next cycle.
            if message.contains("rate limit") || message.contains("quota") {
                FailureType::Expected
            }
            // Transport-level failures suggest degradation or bad config.
            else if message.contains("http")
                || message.contains("timeout")
                || message.contains("connection")
            {
                FailureType::Unexpected
            } else {
                FailureType::Unknown
            }
        }
    }
}

/// Log a collaborator failure with automatic classification.
///
/// Unexpected failures log at error, unknown at warning, expected at
/// debug — so routine provider throttling never pages anyone.
pub fn log_upstream_failure(
    component: Component,
    entity_id: Option<&str>,
    operation: &str,
    err: &CoreError,
) {
    let failure_type = classify_upstream_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(component, entity_id, &message),
        FailureType::Unexpected => error(component, entity_id, &message),
        FailureType::Unknown => warn(component, entity_id, &message),
    }
}
