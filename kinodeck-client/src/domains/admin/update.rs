//! Admin domain update logic.
//!
//! Every action follows the same shape: the dialog collects input, a
//! dispatch claims the busy gate and issues exactly one service call,
//! and the settlement folds the outcome back into the lists. Failure
//! never mutates a list; success patches the affected list locally by
//! id, so an actioned row disappears (or flips) without a refetch.

use std::sync::Arc;

use futures::future::BoxFuture;
use kinodeck_model::{
    ActionRequest, AdminActionKind, ApprovalDecision, ApprovalStatus, BlockUserRequest,
    EntityKind, EntityRef, FilmmakerId, FlagId, FlagResolution, MovieId, UserId, UserStatus,
    VerifyBankRequest,
};

use super::messages::Message;
use super::modal::{Confirmed, ModalConfig};
use super::{AdminState, NOTICE_TTL};
use crate::engine::{Effect, Updated};
use crate::error::{ApiError, ApiResult};
use crate::services::AdminService;
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::LoadDashboard => {
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::DashboardLoaded(service.dashboard().await).into()
            }))
        }

        Message::DashboardLoaded(result) => match result {
            Ok(stats) => {
                state.admin.state.dashboard = Some(stats);
                Updated::none()
            }
            Err(error) => Updated::one(load_failed(state, error, "Could not load the dashboard")),
        },

        Message::LoadFilmmakers => {
            state.admin.state.loading = true;
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::FilmmakersLoaded(service.pending_filmmakers().await).into()
            }))
        }

        Message::FilmmakersLoaded(result) => {
            state.admin.state.loading = false;
            match result {
                Ok(items) => {
                    log::info!("[Admin] {} pending filmmaker(s)", items.len());
                    state.admin.state.pending_filmmakers = items;
                    Updated::none()
                }
                Err(error) => Updated::one(load_failed(
                    state,
                    error,
                    "Could not load pending filmmakers",
                )),
            }
        }

        Message::LoadMovies => {
            state.admin.state.loading = true;
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::MoviesLoaded(service.pending_movies().await).into()
            }))
        }

        Message::MoviesLoaded(result) => {
            state.admin.state.loading = false;
            match result {
                Ok(items) => {
                    state.admin.state.pending_movies = items;
                    Updated::none()
                }
                Err(error) => {
                    Updated::one(load_failed(state, error, "Could not load pending movies"))
                }
            }
        }

        Message::LoadFlagged => {
            state.admin.state.loading = true;
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::FlaggedLoaded(service.flagged_content().await).into()
            }))
        }

        Message::FlaggedLoaded(result) => {
            state.admin.state.loading = false;
            match result {
                Ok(items) => {
                    state.admin.state.flagged = items;
                    Updated::none()
                }
                Err(error) => {
                    Updated::one(load_failed(state, error, "Could not load flagged content"))
                }
            }
        }

        Message::LoadUsers => {
            state.admin.state.loading = true;
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::UsersLoaded(service.users().await).into()
            }))
        }

        Message::UsersLoaded(result) => {
            state.admin.state.loading = false;
            match result {
                Ok(items) => {
                    state.admin.state.users = items;
                    Updated::none()
                }
                Err(error) => Updated::one(load_failed(state, error, "Could not load users")),
            }
        }

        Message::LoadPayments(status) => {
            state.admin.state.loading = true;
            let service = state.admin.service.clone();
            Updated::one(Effect::future(async move {
                Message::PaymentsLoaded(service.payments(status).await).into()
            }))
        }

        Message::PaymentsLoaded(result) => {
            state.admin.state.loading = false;
            match result {
                Ok(report) => {
                    state.admin.state.payments = Some(report);
                    Updated::none()
                }
                Err(error) => {
                    Updated::one(load_failed(state, error, "Could not load the payment report"))
                }
            }
        }

        Message::OpenModal(request) => {
            if !state.admin.state.can_dispatch() {
                log::warn!(
                    "[Admin] dialog for {} refused while an action is in flight",
                    request.target
                );
                return Updated::none();
            }

            let label = target_label(&state.admin.state, &request.target);
            let config = ModalConfig::for_action(request.kind, request.target, &label);
            if !state.admin.state.modal.open(config, request) {
                log::warn!("[Admin] a dialog is already open");
            }
            Updated::none()
        }

        Message::ModalInputChanged(text) => {
            state.admin.state.modal.set_input(text);
            Updated::none()
        }

        Message::ModalConfirmed => match state.admin.state.modal.confirm() {
            Confirmed::Dispatch(request) => dispatch(state, request),
            Confirmed::Invalid => {
                log::debug!("[Admin] confirmation blocked by local validation");
                Updated::none()
            }
            Confirmed::Ignored => Updated::none(),
        },

        Message::ModalCancelled => {
            if !state.admin.state.modal.cancel() {
                log::debug!("[Admin] cancel ignored while submitting");
            }
            Updated::none()
        }

        Message::Dispatch(request) => dispatch(state, request),

        Message::ActionSettled { request, result } => settle(state, request, result),

        Message::ClearNotice(seq) => {
            // A newer notice has bumped the sequence; leave it standing.
            if state.admin.state.notice_seq == seq {
                state.admin.state.success = None;
                state.admin.state.error = None;
            }
            Updated::none()
        }
    }
}

/// Claim the busy gate and issue exactly one call for `request`.
///
/// The gate is checked and set before any effect exists, so a second
/// trigger while something is in flight produces no network traffic.
/// Every settlement path releases the gate.
fn dispatch(state: &mut State, request: ActionRequest) -> Updated {
    if let Some(busy) = &state.admin.state.approving {
        log::warn!(
            "[Admin] {} requested while {busy} is in flight; ignored",
            request.kind.verb()
        );
        return Updated::none();
    }

    if request.kind.requires_reason()
        && request.reason.as_deref().is_none_or(|r| r.trim().is_empty())
    {
        log::warn!("[Admin] {} needs a reason; dropped", request.kind.verb());
        return Updated::none();
    }

    let Some(call) = build_call(state.admin.service.clone(), &request) else {
        log::error!(
            "[Admin] cannot {} a {}",
            request.kind.verb(),
            request.target.kind.as_str()
        );
        return Updated::none();
    };

    log::info!("[Admin] {} {}", request.kind.verb(), request.target);
    state.admin.state.approving = Some(request.target);

    Updated::one(Effect::future(async move {
        let result = call.await;
        Message::ActionSettled { request, result }.into()
    }))
}

/// Map `(kind, target kind)` to the service call it stands for. `None`
/// is a combination the backend has no endpoint for.
fn build_call(
    service: Arc<dyn AdminService>,
    request: &ActionRequest,
) -> Option<BoxFuture<'static, ApiResult<()>>> {
    let target = request.target;
    let reason = request.reason.clone();
    let notes = request.notes.clone();
    let key = request.idempotency_key;

    Some(match (request.kind, target.kind) {
        (AdminActionKind::Block, EntityKind::User) => {
            let id = UserId(target.id);
            let body = BlockUserRequest { reason: reason.unwrap_or_default() };
            Box::pin(async move { service.block_user(id, body).await })
        }
        (AdminActionKind::Unblock, EntityKind::User) => {
            let id = UserId(target.id);
            Box::pin(async move { service.unblock_user(id).await })
        }
        (AdminActionKind::Delete, EntityKind::User) => {
            let id = UserId(target.id);
            Box::pin(async move { service.delete_user(id).await })
        }
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::Filmmaker) => {
            let id = FilmmakerId(target.id);
            let decision = ApprovalDecision { status: decided_status(request.kind), reason };
            Box::pin(async move { service.decide_filmmaker(id, decision).await })
        }
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::Movie) => {
            let id = MovieId(target.id);
            let decision = ApprovalDecision { status: decided_status(request.kind), reason };
            Box::pin(async move { service.decide_movie(id, decision).await })
        }
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::FlaggedItem) => {
            let id = FlagId(target.id);
            // The dialog collects resolution text under "Reason"; the
            // endpoint calls it notes.
            let resolution = FlagResolution {
                status: decided_status(request.kind),
                notes: reason.or(notes),
            };
            Box::pin(async move { service.resolve_flag(id, resolution).await })
        }
        (AdminActionKind::VerifyBank, EntityKind::Filmmaker) => {
            let id = FilmmakerId(target.id);
            let body = VerifyBankRequest { notes };
            Box::pin(async move { service.verify_bank(id, body, key).await })
        }
        _ => return None,
    })
}

fn decided_status(kind: AdminActionKind) -> ApprovalStatus {
    match kind {
        AdminActionKind::Reject => ApprovalStatus::Rejected,
        _ => ApprovalStatus::Approved,
    }
}

/// Fold a settlement into the state. The gate opens on both paths.
fn settle(state: &mut State, request: ActionRequest, result: ApiResult<()>) -> Updated {
    state.admin.state.approving = None;

    match result {
        Ok(()) => {
            apply_success(&mut state.admin.state, &request);
            state.admin.state.modal.settle_success();
            let clear = notify_success(state, success_message(&request));
            Updated::one(clear)
        }
        Err(error) => {
            let message =
                error.user_message(&format!("Could not {}", request.kind.verb()));
            log::error!(
                "[Admin] {} {} failed: {message}",
                request.kind.verb(),
                request.target
            );

            // A failure belonging to the dialog stays in the dialog,
            // with the input preserved for a retry.
            if state.admin.state.modal.settle_failure(message.clone()) {
                Updated::none()
            } else {
                Updated::one(notify_error(state, message))
            }
        }
    }
}

/// Patch the affected list in place. The id comes from the request, so
/// this stays correct even if the list was refetched mid-flight.
fn apply_success(admin: &mut AdminState, request: &ActionRequest) {
    let target = request.target;
    match (request.kind, target.kind) {
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::Filmmaker) => {
            admin.pending_filmmakers.retain(|f| f.id.to_uuid() != target.id);
        }
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::Movie) => {
            admin.pending_movies.retain(|m| m.id.to_uuid() != target.id);
        }
        (AdminActionKind::Approve | AdminActionKind::Reject, EntityKind::FlaggedItem) => {
            admin.flagged.retain(|f| f.id.to_uuid() != target.id);
        }
        (AdminActionKind::Block, EntityKind::User) => {
            if let Some(user) = admin.users.iter_mut().find(|u| u.id.to_uuid() == target.id) {
                user.status = UserStatus::Blocked;
                user.block_reason = request.reason.clone();
            }
        }
        (AdminActionKind::Unblock, EntityKind::User) => {
            if let Some(user) = admin.users.iter_mut().find(|u| u.id.to_uuid() == target.id) {
                user.status = UserStatus::Active;
                user.block_reason = None;
            }
        }
        (AdminActionKind::Delete, EntityKind::User) => {
            admin.users.retain(|u| u.id.to_uuid() != target.id);
        }
        (AdminActionKind::VerifyBank, EntityKind::Filmmaker) => {
            if let Some(filmmaker) = admin
                .pending_filmmakers
                .iter_mut()
                .find(|f| f.id.to_uuid() == target.id)
            {
                filmmaker.bank_verified = true;
            }
        }
        _ => {}
    }
}

fn success_message(request: &ActionRequest) -> String {
    let noun = request.target.kind.as_str();
    match request.kind {
        AdminActionKind::Block => format!("The {noun} has been blocked"),
        AdminActionKind::Unblock => format!("The {noun} has been unblocked"),
        AdminActionKind::Delete => format!("The {noun} has been deleted"),
        AdminActionKind::Approve => format!("The {noun} has been approved"),
        AdminActionKind::Reject => format!("The {noun} has been rejected"),
        AdminActionKind::VerifyBank => "Bank details verified".to_string(),
    }
}

/// Park a success notice and schedule its clearance. Bumping the
/// sequence invalidates any timer still pending for an older notice.
fn notify_success(state: &mut State, message: String) -> Effect {
    let admin = &mut state.admin.state;
    admin.success = Some(message);
    admin.error = None;
    admin.notice_seq += 1;
    Effect::delay(NOTICE_TTL, Message::ClearNotice(admin.notice_seq))
}

fn notify_error(state: &mut State, message: String) -> Effect {
    let admin = &mut state.admin.state;
    admin.error = Some(message);
    admin.notice_seq += 1;
    Effect::delay(NOTICE_TTL, Message::ClearNotice(admin.notice_seq))
}

fn load_failed(state: &mut State, error: ApiError, fallback: &str) -> Effect {
    log::error!("[Admin] {fallback}: {error}");
    notify_error(state, error.user_message(fallback))
}

/// Find a human-readable name for `target` in the loaded lists.
fn target_label(admin: &AdminState, target: &EntityRef) -> String {
    let found = match target.kind {
        EntityKind::User => admin
            .users
            .iter()
            .find(|u| u.id.to_uuid() == target.id)
            .map(|u| u.name.clone()),
        EntityKind::Filmmaker => admin
            .pending_filmmakers
            .iter()
            .find(|f| f.id.to_uuid() == target.id)
            .map(|f| f.name.clone()),
        EntityKind::Movie => admin
            .pending_movies
            .iter()
            .find(|m| m.id.to_uuid() == target.id)
            .map(|m| m.title.clone()),
        EntityKind::FlaggedItem => admin
            .flagged
            .iter()
            .find(|f| f.id.to_uuid() == target.id)
            .map(|f| format!("the report \"{}\"", f.reason)),
    };
    found.unwrap_or_else(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::services::admin::mock::MockAdminService;
    use crate::services::testing::mock_services;
    use kinodeck_model::{ManagedUser, PendingFilmmaker};

    fn state_with(
        users: Vec<ManagedUser>,
        filmmakers: Vec<PendingFilmmaker>,
    ) -> State {
        let (services, _mocks) = mock_services();
        let mut state = State::new(services);
        state.admin.state.users = users;
        state.admin.state.pending_filmmakers = filmmakers;
        state
    }

    fn block(user: &ManagedUser, reason: &str) -> ActionRequest {
        let mut request = ActionRequest::new(EntityRef::user(user.id), AdminActionKind::Block);
        request.reason = Some(reason.to_string());
        request
    }

    #[test]
    fn dispatch_claims_the_gate_and_emits_one_effect() {
        let user = MockAdminService::sample_user("Dana Obi");
        let mut state = state_with(vec![user.clone()], Vec::new());

        let updated = update(&mut state, Message::Dispatch(block(&user, "spam")));

        assert_eq!(updated.effects.len(), 1);
        assert_eq!(state.admin.state.approving, Some(EntityRef::user(user.id)));
        assert!(state.admin.state.is_busy(&EntityRef::user(user.id)));
    }

    #[test]
    fn second_dispatch_while_busy_is_a_noop() {
        let first = MockAdminService::sample_user("Dana Obi");
        let second = MockAdminService::sample_user("Eli Ray");
        let mut state = state_with(vec![first.clone(), second.clone()], Vec::new());

        update(&mut state, Message::Dispatch(block(&first, "spam")));
        let updated = update(&mut state, Message::Dispatch(block(&second, "spam")));

        assert!(updated.is_empty());
        assert_eq!(state.admin.state.approving, Some(EntityRef::user(first.id)));
    }

    #[test]
    fn dispatch_without_a_required_reason_is_dropped() {
        let user = MockAdminService::sample_user("Dana Obi");
        let mut state = state_with(vec![user.clone()], Vec::new());

        let request = ActionRequest::new(EntityRef::user(user.id), AdminActionKind::Block);
        let updated = update(&mut state, Message::Dispatch(request));

        assert!(updated.is_empty());
        assert!(state.admin.state.can_dispatch());
        assert!(state.admin.state.error.is_none());
    }

    #[test]
    fn unsupported_combination_never_claims_the_gate() {
        let mut state = state_with(Vec::new(), Vec::new());

        // There is no endpoint for blocking a movie.
        let request = ActionRequest {
            target: EntityRef::movie(MovieId::new()),
            kind: AdminActionKind::Block,
            reason: Some("n/a".into()),
            notes: None,
            idempotency_key: uuid::Uuid::new_v4(),
        };
        let updated = update(&mut state, Message::Dispatch(request));

        assert!(updated.is_empty());
        assert!(state.admin.state.can_dispatch());
    }

    #[test]
    fn settle_success_removes_the_pending_row() {
        let kept = MockAdminService::sample_filmmaker("Ira Vale");
        let decided = MockAdminService::sample_filmmaker("Noa Lim");
        let mut state = state_with(Vec::new(), vec![kept.clone(), decided.clone()]);

        let request = ActionRequest::new(
            EntityRef::filmmaker(decided.id),
            AdminActionKind::Approve,
        );
        state.admin.state.approving = Some(request.target);

        let updated = update(
            &mut state,
            Message::ActionSettled { request, result: Ok(()) },
        );

        let admin = &state.admin.state;
        assert_eq!(admin.pending_filmmakers.len(), 1);
        assert_eq!(admin.pending_filmmakers[0].id, kept.id);
        assert!(admin.approving.is_none());
        assert_eq!(admin.success.as_deref(), Some("The filmmaker has been approved"));
        // The notice auto-clear timer.
        assert_eq!(updated.effects.len(), 1);
    }

    #[test]
    fn settle_failure_leaves_the_list_untouched() {
        let filmmaker = MockAdminService::sample_filmmaker("Ira Vale");
        let mut state = state_with(Vec::new(), vec![filmmaker.clone()]);

        let request = ActionRequest::new(
            EntityRef::filmmaker(filmmaker.id),
            AdminActionKind::Approve,
        );
        state.admin.state.approving = Some(request.target);

        update(
            &mut state,
            Message::ActionSettled {
                request,
                result: Err(ApiError::Server { status: 502, message: "upstream down".into() }),
            },
        );

        let admin = &state.admin.state;
        assert_eq!(admin.pending_filmmakers.len(), 1);
        assert_eq!(admin.error.as_deref(), Some("upstream down"));
        assert!(admin.success.is_none());
        // The gate reopened, so the action can be retried.
        assert!(admin.can_dispatch());
    }

    #[test]
    fn block_flips_the_user_row_in_place() {
        let user = MockAdminService::sample_user("Dana Obi");
        let mut state = state_with(vec![user.clone()], Vec::new());
        let request = block(&user, "ToS violation");
        state.admin.state.approving = Some(request.target);

        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        let row = &state.admin.state.users[0];
        assert_eq!(row.status, UserStatus::Blocked);
        assert_eq!(row.block_reason.as_deref(), Some("ToS violation"));
    }

    #[test]
    fn unblock_clears_the_stored_reason() {
        let mut user = MockAdminService::sample_user("Dana Obi");
        user.status = UserStatus::Blocked;
        user.block_reason = Some("ToS violation".into());
        let mut state = state_with(vec![user.clone()], Vec::new());

        let request = ActionRequest::new(EntityRef::user(user.id), AdminActionKind::Unblock);
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        let row = &state.admin.state.users[0];
        assert_eq!(row.status, UserStatus::Active);
        assert!(row.block_reason.is_none());
    }

    #[test]
    fn delete_removes_the_user_row() {
        let user = MockAdminService::sample_user("Dana Obi");
        let mut state = state_with(vec![user.clone()], Vec::new());

        let request = ActionRequest::new(EntityRef::user(user.id), AdminActionKind::Delete);
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        assert!(state.admin.state.users.is_empty());
    }

    #[test]
    fn verify_bank_marks_the_filmmaker_row() {
        let filmmaker = MockAdminService::sample_filmmaker("Ira Vale");
        let mut state = state_with(Vec::new(), vec![filmmaker.clone()]);

        let request = ActionRequest::new(
            EntityRef::filmmaker(filmmaker.id),
            AdminActionKind::VerifyBank,
        );
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        assert!(state.admin.state.pending_filmmakers[0].bank_verified);
    }

    #[test]
    fn success_clears_a_standing_error() {
        let user = MockAdminService::sample_user("Dana Obi");
        let mut state = state_with(vec![user.clone()], Vec::new());
        state.admin.state.error = Some("previous failure".into());

        let request = block(&user, "spam");
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        assert!(state.admin.state.error.is_none());
        assert!(state.admin.state.success.is_some());
    }

    #[test]
    fn notice_clear_is_sequence_guarded() {
        let user = MockAdminService::sample_user("Dana Obi");
        let other = MockAdminService::sample_user("Eli Ray");
        let mut state = state_with(vec![user.clone(), other.clone()], Vec::new());

        let request = block(&user, "spam");
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });
        let first_seq = state.admin.state.notice_seq;

        let request = block(&other, "spam");
        state.admin.state.approving = Some(request.target);
        update(&mut state, Message::ActionSettled { request, result: Ok(()) });

        // The older timer fires late and must not wipe the newer notice.
        update(&mut state, Message::ClearNotice(first_seq));
        assert!(state.admin.state.success.is_some());

        let current_seq = state.admin.state.notice_seq;
        update(&mut state, Message::ClearNotice(current_seq));
        assert!(state.admin.state.success.is_none());
    }

    #[tokio::test]
    async fn blocking_a_user_end_to_end() {
        let (services, mocks) = mock_services();
        let user = MockAdminService::sample_user("Dana Obi");
        mocks.admin.managed_users.write().await.push(user.clone());

        let mut engine = Engine::new(State::new(services));
        engine.handle(Message::LoadUsers).await;
        assert_eq!(engine.state().admin.state.users.len(), 1);

        let target = EntityRef::user(user.id);
        engine
            .handle(Message::OpenModal(ActionRequest::new(target, AdminActionKind::Block)))
            .await;

        // Confirming without a reason is rejected locally; the service
        // is never called.
        engine.handle(Message::ModalConfirmed).await;
        assert!(mocks.admin.block_calls.read().await.is_empty());
        assert_eq!(
            engine.state().admin.state.modal.error(),
            Some("Reason is required")
        );

        engine
            .handle(Message::ModalInputChanged("ToS violation".into()))
            .await;
        engine.handle(Message::ModalConfirmed).await;

        {
            let calls = mocks.admin.block_calls.read().await;
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].0, user.id);
            assert_eq!(calls[0].1.reason, "ToS violation");
        }

        let admin = &engine.state().admin.state;
        assert_eq!(admin.users[0].status, UserStatus::Blocked);
        assert!(admin.success.is_some());
        assert!(admin.approving.is_none());
        assert!(!admin.modal.is_open());
    }

    #[tokio::test]
    async fn failed_approval_keeps_the_dialog_and_input() {
        let (services, mocks) = mock_services();
        let filmmaker = MockAdminService::sample_filmmaker("Ira Vale");
        mocks.admin.filmmakers.write().await.push(filmmaker.clone());

        let mut engine = Engine::new(State::new(services));
        engine.handle(Message::LoadFilmmakers).await;

        let target = EntityRef::filmmaker(filmmaker.id);
        engine
            .handle(Message::OpenModal(ActionRequest::new(target, AdminActionKind::Reject)))
            .await;
        engine
            .handle(Message::ModalInputChanged("incomplete portfolio".into()))
            .await;

        mocks
            .admin
            .script_failure(ApiError::Server { status: 503, message: "try later".into() })
            .await;
        engine.handle(Message::ModalConfirmed).await;

        let admin = &engine.state().admin.state;
        assert_eq!(admin.pending_filmmakers.len(), 1);
        assert!(admin.modal.is_open());
        assert_eq!(admin.modal.error(), Some("try later"));
        assert_eq!(admin.modal.input(), Some("incomplete portfolio"));

        // Retry goes through with the preserved input.
        engine.handle(Message::ModalConfirmed).await;

        let calls = mocks.admin.decide_filmmaker_calls.read().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1.status, ApprovalStatus::Rejected);
        assert_eq!(calls[1].1.reason.as_deref(), Some("incomplete portfolio"));
        drop(calls);

        assert!(engine.state().admin.state.pending_filmmakers.is_empty());
        assert!(!engine.state().admin.state.modal.is_open());
    }

    #[tokio::test]
    async fn verify_bank_retry_resends_the_same_idempotency_key() {
        let (services, mocks) = mock_services();
        let filmmaker = MockAdminService::sample_filmmaker("Ira Vale");
        mocks.admin.filmmakers.write().await.push(filmmaker.clone());

        let mut engine = Engine::new(State::new(services));
        engine.handle(Message::LoadFilmmakers).await;

        let target = EntityRef::filmmaker(filmmaker.id);
        engine
            .handle(Message::OpenModal(ActionRequest::new(
                target,
                AdminActionKind::VerifyBank,
            )))
            .await;

        mocks
            .admin
            .script_failure(ApiError::Network("connection reset".into()))
            .await;
        engine.handle(Message::ModalConfirmed).await;
        assert!(engine.state().admin.state.modal.is_open());

        engine.handle(Message::ModalConfirmed).await;

        let calls = mocks.admin.verify_bank_calls.read().await;
        assert_eq!(calls.len(), 2);
        // Same key both times, so the backend can deduplicate.
        assert_eq!(calls[0].2, calls[1].2);
        drop(calls);

        assert!(engine.state().admin.state.pending_filmmakers[0].bank_verified);
    }

    #[tokio::test]
    async fn dismissing_a_flag_sends_the_reason_as_resolution_notes() {
        let (services, mocks) = mock_services();
        let flag = kinodeck_model::FlaggedItem {
            id: FlagId::new(),
            target: EntityRef::movie(MovieId::new()),
            reason: "misleading description".into(),
            reporter_email: None,
            submitted_at: chrono::Utc::now(),
            status: ApprovalStatus::Pending,
        };
        mocks.admin.flagged.write().await.push(flag.clone());

        let mut engine = Engine::new(State::new(services));
        engine.handle(Message::LoadFlagged).await;

        let target = EntityRef::flagged(flag.id);
        engine
            .handle(Message::OpenModal(ActionRequest::new(target, AdminActionKind::Reject)))
            .await;
        engine
            .handle(Message::ModalInputChanged("duplicate report".into()))
            .await;
        engine.handle(Message::ModalConfirmed).await;

        let calls = mocks.admin.resolve_flag_calls.read().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, flag.id);
        assert_eq!(calls[0].1.status, ApprovalStatus::Rejected);
        assert_eq!(calls[0].1.notes.as_deref(), Some("duplicate report"));
        drop(calls);

        assert!(engine.state().admin.state.flagged.is_empty());
    }
}
