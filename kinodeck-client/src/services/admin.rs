//! Back-office service: moderation queues, user management, payments,
//! system health.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use kinodeck_model::{
    ApprovalDecision, BlockUserRequest, DashboardStats, FilmmakerId, FlagId, FlagResolution,
    FlaggedItem, ManagedUser, MovieId, PaymentReport, PaymentStatus, PendingFilmmaker,
    PendingMovie, SystemHealth, UserId, VerifyBankRequest,
};
use uuid::Uuid;

use crate::ApiClient;
use crate::error::ApiResult;

#[async_trait]
pub trait AdminService: Send + Sync + Debug {
    async fn dashboard(&self) -> ApiResult<DashboardStats>;

    async fn system_health(&self) -> ApiResult<SystemHealth>;

    async fn pending_filmmakers(&self) -> ApiResult<Vec<PendingFilmmaker>>;

    async fn decide_filmmaker(
        &self,
        id: FilmmakerId,
        decision: ApprovalDecision,
    ) -> ApiResult<()>;

    /// Monetary call: carries an idempotency key so the backend can
    /// deduplicate a re-sent decision.
    async fn verify_bank(
        &self,
        id: FilmmakerId,
        request: VerifyBankRequest,
        idempotency_key: Uuid,
    ) -> ApiResult<()>;

    async fn pending_movies(&self) -> ApiResult<Vec<PendingMovie>>;

    async fn decide_movie(&self, id: MovieId, decision: ApprovalDecision) -> ApiResult<()>;

    async fn flagged_content(&self) -> ApiResult<Vec<FlaggedItem>>;

    async fn resolve_flag(&self, id: FlagId, resolution: FlagResolution) -> ApiResult<()>;

    async fn users(&self) -> ApiResult<Vec<ManagedUser>>;

    async fn block_user(&self, id: UserId, request: BlockUserRequest) -> ApiResult<()>;

    async fn unblock_user(&self, id: UserId) -> ApiResult<()>;

    async fn delete_user(&self, id: UserId) -> ApiResult<()>;

    async fn payments(&self, status: Option<PaymentStatus>) -> ApiResult<PaymentReport>;
}

/// [`AdminService`] over the live API.
#[derive(Debug, Clone)]
pub struct AdminApiAdapter {
    client: Arc<ApiClient>,
}

impl AdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminService for AdminApiAdapter {
    async fn dashboard(&self) -> ApiResult<DashboardStats> {
        self.client.get("/admin/dashboard").await
    }

    async fn system_health(&self) -> ApiResult<SystemHealth> {
        self.client.get("/admin/system/health").await
    }

    async fn pending_filmmakers(&self) -> ApiResult<Vec<PendingFilmmaker>> {
        self.client.get("/admin/filmmakers/pending").await
    }

    async fn decide_filmmaker(
        &self,
        id: FilmmakerId,
        decision: ApprovalDecision,
    ) -> ApiResult<()> {
        self.client
            .put_no_content(&format!("/admin/filmmakers/{id}/approval"), &decision)
            .await
    }

    async fn verify_bank(
        &self,
        id: FilmmakerId,
        request: VerifyBankRequest,
        idempotency_key: Uuid,
    ) -> ApiResult<()> {
        self.client
            .post_idempotent_no_content(
                &format!("/admin/filmmakers/{id}/verify-bank"),
                &request,
                idempotency_key,
            )
            .await
    }

    async fn pending_movies(&self) -> ApiResult<Vec<PendingMovie>> {
        self.client.get("/admin/movies/pending").await
    }

    async fn decide_movie(&self, id: MovieId, decision: ApprovalDecision) -> ApiResult<()> {
        self.client
            .put_no_content(&format!("/admin/movies/{id}/approval"), &decision)
            .await
    }

    async fn flagged_content(&self) -> ApiResult<Vec<FlaggedItem>> {
        self.client.get("/admin/content/flagged").await
    }

    async fn resolve_flag(&self, id: FlagId, resolution: FlagResolution) -> ApiResult<()> {
        self.client
            .put_no_content(&format!("/admin/content/flagged/{id}"), &resolution)
            .await
    }

    async fn users(&self) -> ApiResult<Vec<ManagedUser>> {
        self.client.get("/admin/users").await
    }

    async fn block_user(&self, id: UserId, request: BlockUserRequest) -> ApiResult<()> {
        self.client
            .put_no_content(&format!("/admin/users/{id}/block"), &request)
            .await
    }

    async fn unblock_user(&self, id: UserId) -> ApiResult<()> {
        self.client
            .put_empty(&format!("/admin/users/{id}/unblock"))
            .await
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        self.client
            .delete_no_content(&format!("/admin/users/{id}"))
            .await
    }

    async fn payments(&self, status: Option<PaymentStatus>) -> ApiResult<PaymentReport> {
        let path = match status {
            Some(status) => format!("/admin/payments?status={}", status.as_str()),
            None => "/admin/payments".to_string(),
        };
        self.client.get(&path).await
    }
}
