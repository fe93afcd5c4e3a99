//! Subscribe domain messages.

use std::path::PathBuf;

use kinodeck_model::{NotifyRequest, SubscriberPage, SubscriberStatus};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    /// A keystroke in the signup email field.
    EmailChanged(String),
    /// Submit the signup form.
    Submit,
    /// The signup call settled.
    Settled(Result<(), ApiError>),

    /// Load one page of the subscriber list (admin).
    LoadPage(u32),
    PageLoaded(Result<SubscriberPage, ApiError>),
    /// Toggle one subscriber's status (admin).
    SetStatus {
        email: String,
        status: SubscriberStatus,
    },
    StatusSettled {
        email: String,
        result: Result<(), ApiError>,
    },
    /// Send a newsletter blast (admin).
    Notify {
        request: NotifyRequest,
        image: Option<PathBuf>,
    },
    NotifySettled(Result<(), ApiError>),

    /// A notice auto-clear timer fired.
    ClearNotice(u64),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmailChanged(_) => "Subscribe::EmailChanged",
            Self::Submit => "Subscribe::Submit",
            Self::Settled(_) => "Subscribe::Settled",
            Self::LoadPage(_) => "Subscribe::LoadPage",
            Self::PageLoaded(_) => "Subscribe::PageLoaded",
            Self::SetStatus { .. } => "Subscribe::SetStatus",
            Self::StatusSettled { .. } => "Subscribe::StatusSettled",
            Self::Notify { .. } => "Subscribe::Notify",
            Self::NotifySettled(_) => "Subscribe::NotifySettled",
            Self::ClearNotice(_) => "Subscribe::ClearNotice",
        }
    }
}
