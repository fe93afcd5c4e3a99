//! Domain modules.
//!
//! Each domain owns one slice of [`State`](crate::state::State) and an
//! `update` function translating its messages into state transitions
//! plus effects. A front end only ever reads state and sends messages;
//! all mutation happens inside these update functions.

pub mod admin;
pub mod catalog;
pub mod health;
pub mod search;
pub mod subscribe;
pub mod upload;
