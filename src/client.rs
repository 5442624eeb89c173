//! HTTP client for the coop monitoring backend

use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::model::{ChickenStatus, SensorReading};

/// Thin wrapper over reqwest bound to the backend base URL
#[derive(Debug, Clone)]
pub struct CoopClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoopClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /sensor_data` — latest environmental reading
    pub async fn fetch_sensor_data(&self) -> Result<SensorReading> {
        let reading = self
            .http
            .get(self.url("/sensor_data"))
            .send()
            .await?
            .error_for_status()?
            .json::<SensorReading>()
            .await?;

        debug!(moisture = reading.moisture, "sensor data fetched");
        Ok(reading)
    }

    /// `GET /chicken_status` — detection counters
    pub async fn fetch_chicken_status(&self) -> Result<ChickenStatus> {
        let status = self
            .http
            .get(self.url("/chicken_status"))
            .send()
            .await?
            .error_for_status()?
            .json::<ChickenStatus>()
            .await?;

        debug!(
            chickens_detected = status.chickens_detected,
            flu_chickens = status.flu_chickens,
            "chicken status fetched"
        );
        Ok(status)
    }

    /// `POST /update_moisture` — push a manual moisture override
    pub async fn update_moisture(&self, moisture: f64) -> Result<()> {
        self.http
            .post(self.url("/update_moisture"))
            .json(&json!({ "moisture": moisture }))
            .send()
            .await?
            .error_for_status()?;

        debug!(moisture, "moisture override sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = CoopClient::new(&ServerConfig {
            base_url: "http://localhost:5001/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.url("/sensor_data"), "http://localhost:5001/sensor_data");
    }
}
