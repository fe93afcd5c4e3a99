//! Filmmaker upload service.

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use kinodeck_model::{Movie, MovieUploadMeta, normalize};
use reqwest::multipart::Form;
use serde_json::Value;

use crate::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::services::file_part;

#[async_trait]
pub trait UploadService: Send + Sync + Debug {
    /// Submit a new title: metadata JSON plus video, poster, and an
    /// optional trailer as multipart file parts. Returns the created
    /// record as the backend stored it.
    async fn upload_movie(
        &self,
        meta: MovieUploadMeta,
        video: PathBuf,
        poster: PathBuf,
        trailer: Option<PathBuf>,
    ) -> ApiResult<Movie>;
}

/// [`UploadService`] over the live API.
#[derive(Debug, Clone)]
pub struct UploadApiAdapter {
    client: Arc<ApiClient>,
}

impl UploadApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UploadService for UploadApiAdapter {
    async fn upload_movie(
        &self,
        meta: MovieUploadMeta,
        video: PathBuf,
        poster: PathBuf,
        trailer: Option<PathBuf>,
    ) -> ApiResult<Movie> {
        let meta_json = serde_json::to_string(&meta)
            .map_err(|err| ApiError::Decode(err.to_string()))?;

        let mut form = Form::new()
            .text("meta", meta_json)
            .part("video", file_part(&video).await?)
            .part("poster", file_part(&poster).await?);

        if let Some(trailer) = trailer {
            form = form.part("trailer", file_part(&trailer).await?);
        }

        let value: Value = self.client.post_multipart("/movies/upload", form).await?;
        normalize(Some(&value))
            .ok_or_else(|| ApiError::Decode("upload response missing id or title".into()))
    }
}
