//! Filmmaker upload metadata.

use serde::{Deserialize, Serialize};

/// The JSON side of a movie upload. The video, poster, and optional
/// trailer travel as multipart file parts next to this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieUploadMeta {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_price: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_price: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub allow_download: bool,
}
