//! Health domain update logic.

use super::messages::Message;
use crate::engine::{Effect, Updated};
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::Start { interval } => {
            let health = &mut state.health.state;
            health.interval = interval;
            health.active = true;
            // New epoch: ticks from any earlier polling run are stale.
            health.epoch += 1;
            log::info!("[Health] polling every {interval:?}");

            Updated::with(vec![probe(state), schedule(state)])
        }

        Message::Tick { epoch } => {
            let health = &state.health.state;
            if !health.active || health.epoch != epoch {
                return Updated::none();
            }

            Updated::with(vec![probe(state), schedule(state)])
        }

        Message::Fetched(result) => {
            if !state.health.state.active {
                return Updated::none();
            }

            match result {
                Ok(health) => {
                    if !health.is_healthy() {
                        log::warn!("[Health] degraded: {}", health.status);
                    }
                    state.health.state.latest = Some(health);
                    state.health.state.error = None;
                }
                Err(error) => {
                    log::error!("[Health] probe failed: {error}");
                    state.health.state.error =
                        Some(error.user_message("Health check failed"));
                }
            }
            Updated::none()
        }

        Message::Stop => {
            state.health.state.active = false;
            log::info!("[Health] polling stopped");
            Updated::none()
        }
    }
}

fn probe(state: &State) -> Effect {
    let service = state.health.service.clone();
    Effect::future(async move { Message::Fetched(service.system_health().await).into() })
}

fn schedule(state: &State) -> Effect {
    let epoch = state.health.state.epoch;
    Effect::delay(state.health.state.interval, Message::Tick { epoch })
}
