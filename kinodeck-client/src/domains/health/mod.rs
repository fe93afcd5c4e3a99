//! System health polling.
//!
//! `Start` fetches immediately and schedules the next tick; every tick
//! that finds the poller still active does the same. `Stop` just clears
//! the active flag: the already-scheduled tick fires, sees the flag
//! down, and dies without fetching or rescheduling, so tearing a view
//! down orphans no timer.

pub mod messages;
pub mod update;

use std::time::Duration;

use kinodeck_model::SystemHealth;

pub use messages::Message;
pub use update::update;

/// Probe interval when the caller does not pick one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct HealthState {
    pub active: bool,
    pub interval: Duration,
    /// Bumped on every `Start`; a tick whose epoch does not match came
    /// from a superseded polling run and is ignored.
    pub epoch: u64,
    pub latest: Option<SystemHealth>,
    pub error: Option<String>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            active: false,
            interval: DEFAULT_INTERVAL,
            epoch: 0,
            latest: None,
            error: None,
        }
    }
}
