//! Wire types for the coop monitoring backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environmental reading returned by `GET /sensor_data`
///
/// The backend merges its health counters into this payload; only the
/// moisture field is consumed here, everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Current moisture level
    pub moisture: f64,
}

/// Detection counters returned by `GET /chicken_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChickenStatus {
    /// Total chickens detected by the upstream detector
    pub chickens_detected: u64,

    /// Chickens classified as flu-positive
    pub flu_chickens: u64,
}

impl ChickenStatus {
    /// True while at least one chicken is classified flu-positive
    pub fn flu_detected(&self) -> bool {
        self.flu_chickens > 0
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moisture: {}", self.moisture)
    }
}

impl fmt::Display for ChickenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "detected: {} / flu: {}",
            self.chickens_detected, self.flu_chickens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_reading_decodes_plain_payload() {
        let reading: SensorReading = serde_json::from_str(r#"{"moisture": 42}"#).unwrap();
        assert_eq!(reading.moisture, 42.0);
    }

    #[test]
    fn sensor_reading_ignores_merged_health_fields() {
        // The backend merges chicken counters into /sensor_data responses
        let reading: SensorReading =
            serde_json::from_str(r#"{"moisture": 37.5, "chickens_detected": 4, "flu_chickens": 1}"#)
                .unwrap();
        assert_eq!(reading.moisture, 37.5);
    }

    #[test]
    fn chicken_status_decodes_counts() {
        let status: ChickenStatus =
            serde_json::from_str(r#"{"chickens_detected": 10, "flu_chickens": 2}"#).unwrap();
        assert_eq!(status.chickens_detected, 10);
        assert_eq!(status.flu_chickens, 2);
        assert!(status.flu_detected());
    }

    #[test]
    fn chicken_status_rejects_negative_counts() {
        let result =
            serde_json::from_str::<ChickenStatus>(r#"{"chickens_detected": -1, "flu_chickens": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn zero_flu_is_not_detected() {
        let status = ChickenStatus {
            chickens_detected: 10,
            flu_chickens: 0,
        };
        assert!(!status.flu_detected());
    }
}
