//! Back-office projections and request DTOs.
//!
//! These are the records the moderation console works with: pending
//! filmmaker applications, pending movie submissions, flagged content,
//! managed user accounts, and the payment reconciliation report. Request
//! DTOs mirror what the backend expects on the corresponding POST bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{EntityRef, FilmmakerId, FlagId, MovieId, PaymentId, UserId};

/// Lifecycle of anything that sits in a moderation queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// A filmmaker application awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingFilmmaker {
    pub id: FilmmakerId,
    pub name: String,
    pub email: String,
    pub status: ApprovalStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub bank_verified: bool,
}

/// A movie submission awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMovie {
    pub id: MovieId,
    pub title: String,
    pub filmmaker_name: String,
    pub status: ApprovalStatus,
    pub submitted_at: DateTime<Utc>,
}

/// A user-reported piece of content awaiting a moderation decision.
/// `Approved` here means the report was upheld, `Rejected` that it was
/// dismissed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedItem {
    pub id: FlagId,
    pub target: EntityRef,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: ApprovalStatus,
}

/// Account standing of a managed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

/// A platform user as seen from the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

/// Every kind of admin action the console can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminActionKind {
    Block,
    Unblock,
    Delete,
    Approve,
    Reject,
    VerifyBank,
}

impl AdminActionKind {
    /// Whether the confirmation dialog must collect a non-empty reason
    /// before this action may be submitted.
    pub fn requires_reason(&self) -> bool {
        matches!(self, AdminActionKind::Block | AdminActionKind::Reject)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            AdminActionKind::Block => "block",
            AdminActionKind::Unblock => "unblock",
            AdminActionKind::Delete => "delete",
            AdminActionKind::Approve => "approve",
            AdminActionKind::Reject => "reject",
            AdminActionKind::VerifyBank => "verify bank details",
        }
    }
}

/// An in-flight admin action. Created when a confirmation dialog opens,
/// consumed when it is confirmed or dismissed; never persisted.
///
/// The idempotency key is minted at creation so that retrying the same
/// confirmation resends the same key, letting the backend deduplicate
/// monetary actions like bank verification.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub target: EntityRef,
    pub kind: AdminActionKind,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub idempotency_key: Uuid,
}

impl ActionRequest {
    pub fn new(target: EntityRef, kind: AdminActionKind) -> Self {
        Self {
            target,
            kind,
            reason: None,
            notes: None,
            idempotency_key: Uuid::new_v4(),
        }
    }
}

/// Body of an approve/reject decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of a block request. Unblocking sends no body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockUserRequest {
    pub reason: String,
}

/// Body of a flagged-content resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagResolution {
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of a bank-details verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyBankRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Headline numbers for the dashboard landing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_filmmakers: u64,
    #[serde(default)]
    pub total_movies: u64,
    #[serde(default)]
    pub pending_filmmakers: u64,
    #[serde(default)]
    pub pending_movies: u64,
    #[serde(default)]
    pub open_flags: u64,
    #[serde(default)]
    pub active_subscribers: u64,
}

/// One system-health probe result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_latency_ms: Option<u64>,
    #[serde(default)]
    pub queue_depth: u64,
    #[serde(default)]
    pub transcoder_online: bool,
    pub checked_at: DateTime<Utc>,
}

impl SystemHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok") && self.transcoder_online
    }
}

/// Settlement state of a filmmaker payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Settled,
    Flagged,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Settled => "settled",
            PaymentStatus::Flagged => "flagged",
        }
    }
}

/// One payout line in the reconciliation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub filmmaker_id: FilmmakerId,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub period: String,
}

/// The reconciliation report as served, with backend-computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReport {
    #[serde(default)]
    pub records: Vec<PaymentRecord>,
    #[serde(default)]
    pub total_pending_cents: i64,
    #[serde(default)]
    pub total_settled_cents: i64,
}
