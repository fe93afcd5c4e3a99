//! Health domain messages.

use std::time::Duration;

use kinodeck_model::SystemHealth;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    /// Begin polling, fetching once immediately.
    Start { interval: Duration },
    /// A scheduled probe came due.
    Tick { epoch: u64 },
    /// A probe settled.
    Fetched(Result<SystemHealth, ApiError>),
    /// Stop polling.
    Stop,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "Health::Start",
            Self::Tick { .. } => "Health::Tick",
            Self::Fetched(_) => "Health::Fetched",
            Self::Stop => "Health::Stop",
        }
    }
}
