//! Effects returned by update functions.
//!
//! An update never performs I/O itself; it returns effects describing
//! the side work. `Future` is the thunk shape: exactly one async
//! operation producing exactly one follow-up message. `Delay` feeds a
//! message back after a quiet period and backs the search debounce,
//! notice auto-clear, and health poll ticks.

use std::time::Duration;

use futures::future::BoxFuture;

use super::message::Message;

pub enum Effect {
    Future(BoxFuture<'static, Message>),
    Delay { duration: Duration, message: Message },
}

impl Effect {
    pub fn future<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        Effect::Future(Box::pin(future))
    }

    pub fn delay(duration: Duration, message: impl Into<Message>) -> Self {
        Effect::Delay { duration, message: message.into() }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Future(_) => write!(f, "Effect::Future"),
            Effect::Delay { duration, message } => {
                write!(f, "Effect::Delay({duration:?}, {})", message.name())
            }
        }
    }
}

/// What an update call produced.
#[derive(Debug)]
pub struct Updated {
    pub effects: Vec<Effect>,
}

impl Updated {
    /// No side work.
    pub fn none() -> Self {
        Self { effects: Vec::new() }
    }

    pub fn one(effect: Effect) -> Self {
        Self { effects: vec![effect] }
    }

    pub fn with(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
