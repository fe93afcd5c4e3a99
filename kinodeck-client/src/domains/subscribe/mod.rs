//! Newsletter domain: the public signup form and the admin subscriber
//! list.

pub mod messages;
pub mod update;

use std::time::Duration;

use kinodeck_model::SubscriberPage;
use once_cell::sync::Lazy;
use regex::Regex;

pub use messages::Message;
pub use update::update;

/// How long the signup notice stays up before auto-clearing.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Shallow shape check, the same one the signup form runs before it
/// lets a submit through. The backend stays the authority on whether an
/// address is acceptable.
pub fn valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

#[derive(Debug, Default)]
pub struct SubscribeState {
    /// Signup form.
    pub email: String,
    /// Validation message scoped to the email field.
    pub field_error: Option<String>,
    pub submitting: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// Sequence guard for notice auto-clear timers.
    pub notice_seq: u64,

    /// Admin subscriber list.
    pub page: Option<SubscriberPage>,
    pub loading: bool,
}
