//! Back-office moderation domain.
//!
//! Covers the moderation queues (filmmaker applications, movie
//! submissions, flagged content), user management, payment
//! reconciliation, and the dashboard. Every destructive action flows
//! through the shared confirmation dialog in [`modal`] and the
//! single-slot busy gate in [`AdminState::approving`]: while one action
//! is in flight, every further trigger is a no-op, so double-clicks and
//! stale rows cannot double-fire a moderation call.

pub mod messages;
pub mod modal;
pub mod update;

use std::time::Duration;

use kinodeck_model::{
    DashboardStats, EntityRef, FlaggedItem, ManagedUser, PaymentReport, PendingFilmmaker,
    PendingMovie,
};

pub use messages::Message;
pub use modal::{ConfirmModal, Confirmed, InputSpec, ModalConfig, ModalKind};
pub use update::update;

/// How long a success or error notice stays up before auto-clearing.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct AdminState {
    pub pending_filmmakers: Vec<PendingFilmmaker>,
    pub pending_movies: Vec<PendingMovie>,
    pub flagged: Vec<FlaggedItem>,
    pub users: Vec<ManagedUser>,
    pub payments: Option<PaymentReport>,
    pub dashboard: Option<DashboardStats>,
    pub loading: bool,
    /// The busy gate: target of the one action allowed in flight.
    pub approving: Option<EntityRef>,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Sequence guard for notice auto-clear timers. A newer notice bumps
    /// this, so an older timer firing late cannot wipe it.
    pub notice_seq: u64,
    pub modal: ConfirmModal,
}

impl AdminState {
    /// Whether a new action may be dispatched right now.
    pub fn can_dispatch(&self) -> bool {
        self.approving.is_none()
    }

    /// Whether `target` is the entity currently being acted on, for
    /// disabling that row's triggers.
    pub fn is_busy(&self, target: &EntityRef) -> bool {
        self.approving.as_ref() == Some(target)
    }
}
