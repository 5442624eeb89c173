//! Polling loop - two fixed-cadence fetch tasks
//!
//! Each endpoint is polled by its own task on an independent 500ms timer,
//! matching the original client's two unconditional `setInterval` loops.
//! Results are folded into the shared dashboard state; a failed or
//! malformed response is logged and the cycle's update simply does not
//! occur. Each fetch is awaited within its tick loop, so requests to one
//! endpoint never overlap and a stale response cannot overwrite a newer
//! one.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::CoopClient;
use crate::state::DashboardState;

/// Fixed polling cadence per task
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Owns the shared state and the two polling tasks
pub struct Poller {
    client: Arc<CoopClient>,
    state: Arc<RwLock<DashboardState>>,
    token: CancellationToken,
}

impl Poller {
    pub fn new(client: CoopClient) -> Self {
        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(DashboardState::new())),
            token: CancellationToken::new(),
        }
    }

    /// Handle to the shared state for the view layer
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    /// Spawn the sensor and chicken status tasks
    pub fn spawn(&self) -> Vec<JoinHandle<()>> {
        info!("Starting polling tasks ({}ms interval)", POLL_INTERVAL.as_millis());

        let sensor = tokio::spawn(poll_sensor(
            Arc::clone(&self.client),
            Arc::clone(&self.state),
            self.token.clone(),
        ));
        let status = tokio::spawn(poll_chicken_status(
            Arc::clone(&self.client),
            Arc::clone(&self.state),
            self.token.clone(),
        ));

        vec![sensor, status]
    }

    /// Request both tasks to stop
    pub fn stop(&self) {
        info!("Stopping polling tasks");
        self.token.cancel();
    }
}

async fn poll_sensor(
    client: Arc<CoopClient>,
    state: Arc<RwLock<DashboardState>>,
    token: CancellationToken,
) {
    let mut tick = interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match client.fetch_sensor_data().await {
                    Ok(reading) => {
                        state.write().await.apply_sensor_reading(&reading, Utc::now());
                    },
                    Err(e) => {
                        warn!(endpoint = "sensor_data", error = %e, "poll cycle failed");
                        state.write().await.record_sensor_error();
                    },
                }
            }
            _ = token.cancelled() => {
                debug!("sensor polling task stopped");
                break;
            }
        }
    }
}

async fn poll_chicken_status(
    client: Arc<CoopClient>,
    state: Arc<RwLock<DashboardState>>,
    token: CancellationToken,
) {
    let mut tick = interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match client.fetch_chicken_status().await {
                    Ok(status) => {
                        state.write().await.apply_chicken_status(&status, Utc::now());
                    },
                    Err(e) => {
                        warn!(endpoint = "chicken_status", error = %e, "poll cycle failed");
                        state.write().await.record_status_error();
                    },
                }
            }
            _ = token.cancelled() => {
                debug!("chicken status polling task stopped");
                break;
            }
        }
    }
}
