//! Newsletter subscriber records.
//!
//! Subscriber state lives server-side. After any mutation (status toggle,
//! removal, notification send) the console refetches the page it is on
//! instead of patching locally, so these types carry no local-edit
//! helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Inactive,
}

impl SubscriberStatus {
    pub fn toggled(&self) -> Self {
        match self {
            SubscriberStatus::Active => SubscriberStatus::Inactive,
            SubscriberStatus::Inactive => SubscriberStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberRecord {
    pub email: String,
    pub status: SubscriberStatus,
    pub updated_at: DateTime<Utc>,
}

/// One page of the subscriber list as served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberPage {
    #[serde(default)]
    pub subscribers: Vec<SubscriberRecord>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    25
}

/// Body of the public subscribe endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Body of the admin status toggle. The endpoint is not per-subscriber,
/// so the body names the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberStatusUpdate {
    pub email: String,
    pub status: SubscriberStatus,
}

/// Text of a newsletter blast. An attached image travels as a multipart
/// part alongside this, not inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_toggle_flips_both_ways() {
        assert_eq!(SubscriberStatus::Active.toggled(), SubscriberStatus::Inactive);
        assert_eq!(SubscriberStatus::Inactive.toggled(), SubscriberStatus::Active);
    }

    #[test]
    fn page_defaults_survive_sparse_payloads() {
        let page: SubscriberPage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 25);
        assert!(page.subscribers.is_empty());
        assert_eq!(page.total, 0);
    }
}
