//! The engine: single owner of application state.
//!
//! All state transitions happen on the engine's task, one message at a
//! time. Effects run on tokio and feed their follow-up messages back
//! through a channel, so network operations overlap freely while state
//! mutation stays serialized.

use tokio::sync::mpsc;

use super::effect::Effect;
use super::message::Message;
use crate::state::State;
use crate::update::update;

/// A message arriving on the feedback channel.
///
/// `Settled` closes out a tracked async effect; `Timer` comes from a
/// delay (or an external injector) and is not tracked, so a pending
/// notice-clear timer never stalls [`Engine::handle`].
enum Inbound {
    Settled(Message),
    Timer(Message),
}

/// Injects messages into a running engine from outside.
#[derive(Clone, Debug)]
pub struct Injector {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl Injector {
    pub fn send(&self, message: impl Into<Message>) {
        let _ = self.tx.send(Inbound::Timer(message.into()));
    }
}

pub struct Engine {
    state: State,
    tx: mpsc::UnboundedSender<Inbound>,
    rx: mpsc::UnboundedReceiver<Inbound>,
    inflight: usize,
}

impl Engine {
    pub fn new(state: State) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx, inflight: 0 }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn injector(&self) -> Injector {
        Injector { tx: self.tx.clone() }
    }

    /// Route one message through its domain update and start the
    /// returned effects. Synchronous; the effects settle later.
    pub fn apply(&mut self, message: Message) {
        log::debug!("[Engine] {}", message.name());
        let updated = update(&mut self.state, message);
        for effect in updated.effects {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::Future(future) => {
                self.inflight += 1;
                tokio::spawn(async move {
                    let _ = tx.send(Inbound::Settled(future.await));
                });
            }
            Effect::Delay { duration, message } => {
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = tx.send(Inbound::Timer(message));
                });
            }
        }
    }

    /// Process a message and everything it transitively spawns, until no
    /// tracked effect remains in flight. Delay timers are not waited on.
    pub async fn handle(&mut self, message: impl Into<Message>) -> &State {
        self.apply(message.into());
        self.drain().await;
        self.state()
    }

    /// Wait for the next inbound message (typically a fired timer),
    /// process it and everything it spawns. Returns `false` if the
    /// channel closed.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(inbound) => {
                self.receive(inbound);
                self.drain().await;
                true
            }
            None => false,
        }
    }

    /// Drive the engine until the injector side hangs up.
    pub async fn run(mut self) {
        while self.step().await {}
    }

    async fn drain(&mut self) {
        while self.inflight > 0 {
            match self.rx.recv().await {
                Some(inbound) => self.receive(inbound),
                None => break,
            }
        }
    }

    fn receive(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Settled(message) => {
                self.inflight = self.inflight.saturating_sub(1);
                self.apply(message);
            }
            Inbound::Timer(message) => self.apply(message),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("inflight", &self.inflight)
            .finish()
    }
}
