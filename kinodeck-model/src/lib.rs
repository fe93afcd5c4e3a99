//! Core data model definitions shared across Kinodeck crates.
//!
//! These are client-side projections of server resources: the client owns
//! no persistent data, so every type here is either a decoded response
//! shape or a request payload. The one piece of real logic is the movie
//! normalization adapter in [`movie`], which reconciles the two backend
//! record shapes into a single canonical one.
#![allow(missing_docs)]

pub mod admin;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod movie;
pub mod review;
pub mod subscriber;
pub mod upload;

// Intentionally curated re-exports for downstream consumers.
pub use admin::{
    ActionRequest, AdminActionKind, ApprovalDecision, ApprovalStatus,
    BlockUserRequest, DashboardStats, FlagResolution, FlaggedItem,
    ManagedUser, PaymentRecord, PaymentReport, PaymentStatus,
    PendingFilmmaker, PendingMovie, SystemHealth, UserStatus,
    VerifyBankRequest,
};
pub use envelope::{ApiEnvelope, extract_error_message, unwrap_data};
pub use error::{DecodeError, Result as ModelResult};
pub use ids::{EntityKind, EntityRef, FilmmakerId, FlagId, MovieId, PaymentId, UserId};
pub use movie::{
    FilmmakerCredit, Genre, Movie, MovieShape, PurchaseConfirmation,
    PurchaseKind, RawMovie, normalize, normalize_batch,
};
pub use review::{RatingRequest, Review, ReviewRequest};
pub use subscriber::{
    NotifyRequest, SubscribeRequest, SubscriberPage, SubscriberRecord,
    SubscriberStatus, SubscriberStatusUpdate,
};
pub use upload::MovieUploadMeta;
