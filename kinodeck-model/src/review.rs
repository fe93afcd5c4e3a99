//! Viewer reviews and ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a review submission. Rating is optional so a comment-only
/// review stays valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub comment: String,
}

/// Body of a bare star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRequest {
    pub rating: u8,
}

/// A review as served for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
