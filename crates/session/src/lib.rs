//! Session orchestration for the fragmented-market simulator
//!
//! Wires the venues, the regulator and the participant population together
//! from one [`SessionConfig`], drives the event loop and distills the run
//! into a [`SessionReport`]:
//!
//! - **Config**: serde-loadable calibration with the reference defaults
//! - **Schedule**: independent Poisson arrivals plus the batch tick grid
//! - **Session**: the event loop, intent dispatch and report application
//! - **Report**: latency, spread, volatility and surplus by class

pub mod config;
pub mod error;
pub mod report;
pub mod schedule;
pub mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use report::SessionReport;
pub use session::Session;
