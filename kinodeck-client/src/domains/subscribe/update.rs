//! Subscribe domain update logic.

use super::messages::Message;
use super::{NOTICE_TTL, valid_email};
use crate::engine::{Effect, Updated};
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::EmailChanged(email) => {
            state.subscribe.state.email = email;
            state.subscribe.state.field_error = None;
            Updated::none()
        }

        Message::Submit => {
            if state.subscribe.state.submitting {
                return Updated::none();
            }

            let email = state.subscribe.state.email.trim().to_string();
            if !valid_email(&email) {
                // Field-level only; the domain notice slots stay as
                // they are.
                state.subscribe.state.field_error =
                    Some("Enter a valid email address".into());
                return Updated::none();
            }

            state.subscribe.state.submitting = true;
            state.subscribe.state.field_error = None;
            let service = state.subscribe.service.clone();
            Updated::one(Effect::future(async move {
                Message::Settled(service.subscribe(&email).await).into()
            }))
        }

        Message::Settled(result) => {
            state.subscribe.state.submitting = false;
            match result {
                Ok(()) => {
                    log::info!("[Subscribe] signup accepted");
                    state.subscribe.state.email.clear();
                    Updated::one(notify(state, Notice::Success("Thanks for subscribing!")))
                }
                Err(error) => {
                    // The address stays in the field for a retry.
                    log::warn!("[Subscribe] signup failed: {error}");
                    let message = error.user_message("Could not subscribe right now");
                    Updated::one(notify(state, Notice::Error(message)))
                }
            }
        }

        Message::LoadPage(page) => {
            state.subscribe.state.loading = true;
            let service = state.subscribe.service.clone();
            Updated::one(Effect::future(async move {
                Message::PageLoaded(service.subscribers(page).await).into()
            }))
        }

        Message::PageLoaded(result) => {
            state.subscribe.state.loading = false;
            match result {
                Ok(page) => {
                    state.subscribe.state.page = Some(page);
                    Updated::none()
                }
                Err(error) => {
                    let message = error.user_message("Could not load subscribers");
                    Updated::one(notify(state, Notice::Error(message)))
                }
            }
        }

        Message::SetStatus { email, status } => {
            let service = state.subscribe.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.set_status(&email, status).await;
                Message::StatusSettled { email, result }.into()
            }))
        }

        Message::StatusSettled { email, result } => match result {
            Ok(()) => {
                log::info!("[Subscribe] status updated for {email}");
                // The list is server-paginated, so re-pull the current
                // page rather than patching one row locally.
                let page = state.subscribe.state.page.as_ref().map(|p| p.page).unwrap_or(1);
                state.subscribe.state.loading = true;
                let service = state.subscribe.service.clone();
                let refetch = Effect::future(async move {
                    Message::PageLoaded(service.subscribers(page).await).into()
                });
                let clear = notify(state, Notice::Success("Subscriber updated"));
                Updated::with(vec![refetch, clear])
            }
            Err(error) => {
                let message = error.user_message("Could not update the subscriber");
                Updated::one(notify(state, Notice::Error(message)))
            }
        },

        Message::Notify { request, image } => {
            let service = state.subscribe.service.clone();
            Updated::one(Effect::future(async move {
                Message::NotifySettled(service.notify(request, image).await).into()
            }))
        }

        Message::NotifySettled(result) => match result {
            Ok(()) => Updated::one(notify(state, Notice::Success("Notification sent"))),
            Err(error) => {
                let message = error.user_message("Could not send the notification");
                Updated::one(notify(state, Notice::Error(message)))
            }
        },

        Message::ClearNotice(seq) => {
            if state.subscribe.state.notice_seq == seq {
                state.subscribe.state.notice = None;
                state.subscribe.state.error = None;
            }
            Updated::none()
        }
    }
}

enum Notice {
    Success(&'static str),
    Error(String),
}

/// Park a notice and schedule its clearance, sequence-guarded like the
/// admin notices.
fn notify(state: &mut State, notice: Notice) -> Effect {
    let subscribe = &mut state.subscribe.state;
    match notice {
        Notice::Success(message) => {
            subscribe.notice = Some(message.to_string());
            subscribe.error = None;
        }
        Notice::Error(message) => {
            subscribe.error = Some(message);
        }
    }
    subscribe.notice_seq += 1;
    Effect::delay(NOTICE_TTL, Message::ClearNotice(subscribe.notice_seq))
}
