//! Service traits over the platform API.
//!
//! Domain update functions depend on these traits, never on `ApiClient`
//! directly, so every flow can be driven against recorded mocks in
//! tests. Each trait has one `…ApiAdapter` implementation that holds a
//! shared [`ApiClient`](crate::ApiClient).

pub mod admin;
pub mod catalog;
pub mod subscribers;
pub mod upload;

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::Part;

use crate::error::{ApiError, ApiResult};

pub use admin::{AdminApiAdapter, AdminService};
pub use catalog::{CatalogApiAdapter, CatalogService};
pub use subscribers::{SubscriberApiAdapter, SubscriberService};
pub use upload::{UploadApiAdapter, UploadService};

/// The service handles a running engine holds.
#[derive(Clone, Debug)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub admin: Arc<dyn AdminService>,
    pub subscribers: Arc<dyn SubscriberService>,
    pub upload: Arc<dyn UploadService>,
}

impl Services {
    /// Wire every service to the same API client.
    pub fn over_api(client: Arc<crate::ApiClient>) -> Self {
        Self {
            catalog: Arc::new(CatalogApiAdapter::new(client.clone())),
            admin: Arc::new(AdminApiAdapter::new(client.clone())),
            subscribers: Arc::new(SubscriberApiAdapter::new(client.clone())),
            upload: Arc::new(UploadApiAdapter::new(client)),
        }
    }
}

/// Read a file into a multipart part named after its final path segment.
pub(crate) async fn file_part(path: &Path) -> ApiResult<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ApiError::File(format!("{}: {err}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    Ok(Part::bytes(bytes).file_name(file_name))
}
