//! Terminal polling client for the coop monitoring backend
//!
//! Periodically fetches the backend's sensor and chicken health endpoints,
//! folds the responses into an explicit dashboard state, and renders that
//! state through a live TUI or one-shot console output.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod state;
pub mod view;
