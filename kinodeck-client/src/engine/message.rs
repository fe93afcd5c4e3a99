//! The domain message router.

use crate::domains::{admin, catalog, health, search, subscribe, upload};

/// Every message the engine can process, one variant per domain.
#[derive(Debug)]
pub enum Message {
    Catalog(catalog::Message),
    Search(search::Message),
    Admin(admin::Message),
    Subscribe(subscribe::Message),
    Upload(upload::Message),
    Health(health::Message),

    NoOp,
}

// Automatic routing from domain messages
impl From<catalog::Message> for Message {
    fn from(msg: catalog::Message) -> Self {
        Message::Catalog(msg)
    }
}

impl From<search::Message> for Message {
    fn from(msg: search::Message) -> Self {
        Message::Search(msg)
    }
}

impl From<admin::Message> for Message {
    fn from(msg: admin::Message) -> Self {
        Message::Admin(msg)
    }
}

impl From<subscribe::Message> for Message {
    fn from(msg: subscribe::Message) -> Self {
        Message::Subscribe(msg)
    }
}

impl From<upload::Message> for Message {
    fn from(msg: upload::Message) -> Self {
        Message::Upload(msg)
    }
}

impl From<health::Message> for Message {
    fn from(msg: health::Message) -> Self {
        Message::Health(msg)
    }
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog(msg) => msg.name(),
            Self::Search(msg) => msg.name(),
            Self::Admin(msg) => msg.name(),
            Self::Subscribe(msg) => msg.name(),
            Self::Upload(msg) => msg.name(),
            Self::Health(msg) => msg.name(),
            Self::NoOp => "NoOp",
        }
    }
}
