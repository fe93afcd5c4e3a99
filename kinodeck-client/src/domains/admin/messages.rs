//! Admin domain messages.

use kinodeck_model::{
    ActionRequest, DashboardStats, FlaggedItem, ManagedUser, PaymentReport, PaymentStatus,
    PendingFilmmaker, PendingMovie,
};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    LoadDashboard,
    DashboardLoaded(Result<DashboardStats, ApiError>),
    LoadFilmmakers,
    FilmmakersLoaded(Result<Vec<PendingFilmmaker>, ApiError>),
    LoadMovies,
    MoviesLoaded(Result<Vec<PendingMovie>, ApiError>),
    LoadFlagged,
    FlaggedLoaded(Result<Vec<FlaggedItem>, ApiError>),
    LoadUsers,
    UsersLoaded(Result<Vec<ManagedUser>, ApiError>),
    LoadPayments(Option<PaymentStatus>),
    PaymentsLoaded(Result<PaymentReport, ApiError>),

    /// Open the confirmation dialog for an action.
    OpenModal(ActionRequest),
    ModalInputChanged(String),
    ModalConfirmed,
    ModalCancelled,

    /// Dispatch an action directly, without a dialog. Same gate, same
    /// validation as the confirmed path.
    Dispatch(ActionRequest),
    /// An action's service call settled.
    ActionSettled {
        request: ActionRequest,
        result: Result<(), ApiError>,
    },

    /// A notice auto-clear timer fired.
    ClearNotice(u64),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadDashboard => "Admin::LoadDashboard",
            Self::DashboardLoaded(_) => "Admin::DashboardLoaded",
            Self::LoadFilmmakers => "Admin::LoadFilmmakers",
            Self::FilmmakersLoaded(_) => "Admin::FilmmakersLoaded",
            Self::LoadMovies => "Admin::LoadMovies",
            Self::MoviesLoaded(_) => "Admin::MoviesLoaded",
            Self::LoadFlagged => "Admin::LoadFlagged",
            Self::FlaggedLoaded(_) => "Admin::FlaggedLoaded",
            Self::LoadUsers => "Admin::LoadUsers",
            Self::UsersLoaded(_) => "Admin::UsersLoaded",
            Self::LoadPayments(_) => "Admin::LoadPayments",
            Self::PaymentsLoaded(_) => "Admin::PaymentsLoaded",
            Self::OpenModal(_) => "Admin::OpenModal",
            Self::ModalInputChanged(_) => "Admin::ModalInputChanged",
            Self::ModalConfirmed => "Admin::ModalConfirmed",
            Self::ModalCancelled => "Admin::ModalCancelled",
            Self::Dispatch(_) => "Admin::Dispatch",
            Self::ActionSettled { .. } => "Admin::ActionSettled",
            Self::ClearNotice(_) => "Admin::ClearNotice",
        }
    }
}
