//! Message routing and effect execution.

pub mod effect;
pub mod message;
pub mod runtime;

pub use effect::{Effect, Updated};
pub use message::Message;
pub use runtime::{Engine, Injector};
