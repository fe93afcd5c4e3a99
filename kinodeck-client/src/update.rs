//! Routes engine messages to their domain update functions.

use crate::domains::{admin, catalog, health, search, subscribe, upload};
use crate::engine::{Message, Updated};
use crate::state::State;

/// Apply one message to the state tree.
///
/// Purely synchronous: any asynchronous work comes back as effects for
/// the engine to run.
pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::Catalog(message) => catalog::update(state, message),
        Message::Search(message) => search::update(state, message),
        Message::Admin(message) => admin::update(state, message),
        Message::Subscribe(message) => subscribe::update(state, message),
        Message::Upload(message) => upload::update(state, message),
        Message::Health(message) => health::update(state, message),
        Message::NoOp => Updated::none(),
    }
}
