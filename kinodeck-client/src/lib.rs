//! Headless client engine for the Kinodeck streaming platform.
//!
//! State lives in one [`State`] tree, one slice per domain. Messages go
//! through the per-domain `update` functions in [`domains`], which
//! mutate state synchronously and hand back [`Effect`]s; the [`Engine`]
//! executes those effects on tokio and feeds their follow-up messages
//! back in. Network access is confined to [`ApiClient`] behind the
//! service traits in [`services`], so every flow can run against
//! recorded mocks.
#![allow(missing_docs)]

pub mod api_client;
pub mod domains;
pub mod engine;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod update;

pub use api_client::ApiClient;
pub use engine::{Effect, Engine, Injector, Message, Updated};
pub use error::{ApiError, ApiResult};
pub use services::Services;
pub use session::SessionStore;
pub use state::State;
