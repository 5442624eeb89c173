//! Dashboard state and pure update functions
//!
//! The original client wrote fetch results straight into display targets.
//! Here the latest values live in an explicit state object which the
//! polling tasks update and the view layer renders.

use chrono::{DateTime, Utc};

use crate::model::{ChickenStatus, SensorReading};

/// Fixed warning shown while flu-positive chickens are detected
pub const FLU_WARNING: &str = "WASPADA TERDAPAT AYAM YANG TERDETEKSI TERJANGKIT FLU BURUNG!";

/// Placeholder for values that have not been fetched yet
const NO_VALUE: &str = "-";

/// Latest known backend values plus per-task bookkeeping
///
/// Each group of fields is written by exactly one polling task.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    moisture: Option<f64>,
    chickens_detected: Option<u64>,
    flu_chickens: Option<u64>,

    last_sensor_update: Option<DateTime<Utc>>,
    last_status_update: Option<DateTime<Utc>>,

    sensor_errors: u64,
    status_errors: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a successful sensor fetch into the state
    pub fn apply_sensor_reading(&mut self, reading: &SensorReading, at: DateTime<Utc>) {
        self.moisture = Some(reading.moisture);
        self.last_sensor_update = Some(at);
    }

    /// Fold a successful chicken status fetch into the state
    pub fn apply_chicken_status(&mut self, status: &ChickenStatus, at: DateTime<Utc>) {
        self.chickens_detected = Some(status.chickens_detected);
        self.flu_chickens = Some(status.flu_chickens);
        self.last_status_update = Some(at);
    }

    /// Count a failed sensor cycle; the displayed value is left untouched
    pub fn record_sensor_error(&mut self) {
        self.sensor_errors += 1;
    }

    /// Count a failed chicken status cycle
    pub fn record_status_error(&mut self) {
        self.status_errors += 1;
    }

    /// Warning banner text, present only while flu-positive chickens exist
    pub fn banner(&self) -> Option<&'static str> {
        match self.flu_chickens {
            Some(n) if n > 0 => Some(FLU_WARNING),
            _ => None,
        }
    }

    /// Text for the "moisture" display target
    pub fn moisture_display(&self) -> String {
        match self.moisture {
            Some(v) => format!("{}", v),
            None => NO_VALUE.to_string(),
        }
    }

    /// Text for the "total-detected" display target
    pub fn total_detected_display(&self) -> String {
        match self.chickens_detected {
            Some(n) => n.to_string(),
            None => NO_VALUE.to_string(),
        }
    }

    /// Text for the "flu-detected" display target
    pub fn flu_detected_display(&self) -> String {
        match self.flu_chickens {
            Some(n) => n.to_string(),
            None => NO_VALUE.to_string(),
        }
    }

    pub fn moisture(&self) -> Option<f64> {
        self.moisture
    }

    pub fn chickens_detected(&self) -> Option<u64> {
        self.chickens_detected
    }

    pub fn flu_chickens(&self) -> Option<u64> {
        self.flu_chickens
    }

    pub fn last_sensor_update(&self) -> Option<DateTime<Utc>> {
        self.last_sensor_update
    }

    pub fn last_status_update(&self) -> Option<DateTime<Utc>> {
        self.last_status_update
    }

    pub fn sensor_errors(&self) -> u64 {
        self.sensor_errors
    }

    pub fn status_errors(&self) -> u64 {
        self.status_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(chickens_detected: u64, flu_chickens: u64) -> ChickenStatus {
        ChickenStatus {
            chickens_detected,
            flu_chickens,
        }
    }

    #[test]
    fn fresh_state_shows_placeholders_and_no_banner() {
        let state = DashboardState::new();
        assert_eq!(state.moisture_display(), "-");
        assert_eq!(state.total_detected_display(), "-");
        assert_eq!(state.flu_detected_display(), "-");
        assert!(state.banner().is_none());
    }

    #[test]
    fn moisture_42_displays_as_42() {
        let mut state = DashboardState::new();
        state.apply_sensor_reading(&SensorReading { moisture: 42.0 }, Utc::now());
        assert_eq!(state.moisture_display(), "42");
    }

    #[test]
    fn moisture_reflects_most_recent_reading() {
        let mut state = DashboardState::new();
        state.apply_sensor_reading(&SensorReading { moisture: 42.0 }, Utc::now());
        state.apply_sensor_reading(&SensorReading { moisture: 57.3 }, Utc::now());
        assert_eq!(state.moisture_display(), "57.3");
    }

    #[test]
    fn zero_flu_hides_banner() {
        let mut state = DashboardState::new();
        state.apply_chicken_status(&status(10, 0), Utc::now());
        assert_eq!(state.flu_detected_display(), "0");
        assert_eq!(state.total_detected_display(), "10");
        assert!(state.banner().is_none());
    }

    #[test]
    fn positive_flu_shows_fixed_warning() {
        let mut state = DashboardState::new();
        state.apply_chicken_status(&status(10, 2), Utc::now());
        assert_eq!(state.flu_detected_display(), "2");
        assert_eq!(state.banner(), Some(FLU_WARNING));
    }

    #[test]
    fn banner_clears_when_flu_count_drops_to_zero() {
        let mut state = DashboardState::new();
        state.apply_chicken_status(&status(10, 2), Utc::now());
        assert!(state.banner().is_some());
        state.apply_chicken_status(&status(10, 0), Utc::now());
        assert!(state.banner().is_none());
    }

    #[test]
    fn failed_cycle_leaves_values_untouched() {
        let mut state = DashboardState::new();
        state.apply_sensor_reading(&SensorReading { moisture: 42.0 }, Utc::now());
        state.record_sensor_error();
        assert_eq!(state.moisture_display(), "42");
        assert_eq!(state.sensor_errors(), 1);
    }
}
