//! Newsletter subscriber service.

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use kinodeck_model::{
    NotifyRequest, SubscribeRequest, SubscriberPage, SubscriberStatus, SubscriberStatusUpdate,
};
use reqwest::multipart::Form;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::services::file_part;

#[async_trait]
pub trait SubscriberService: Send + Sync + Debug {
    /// Public subscribe endpoint, no authentication required.
    async fn subscribe(&self, email: &str) -> ApiResult<()>;

    /// One page of the subscriber list (admin).
    async fn subscribers(&self, page: u32) -> ApiResult<SubscriberPage>;

    /// Toggle a subscriber's status (admin). Callers refetch afterwards.
    async fn set_status(&self, email: &str, status: SubscriberStatus) -> ApiResult<()>;

    /// Send a newsletter blast, optionally with an attached image.
    async fn notify(&self, request: NotifyRequest, image: Option<PathBuf>) -> ApiResult<()>;
}

/// [`SubscriberService`] over the live API.
#[derive(Debug, Clone)]
pub struct SubscriberApiAdapter {
    client: Arc<ApiClient>,
}

impl SubscriberApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriberService for SubscriberApiAdapter {
    async fn subscribe(&self, email: &str) -> ApiResult<()> {
        let body = SubscribeRequest { email: email.to_string() };
        self.client.post_no_content("/subscribe/new", &body).await
    }

    async fn subscribers(&self, page: u32) -> ApiResult<SubscriberPage> {
        self.client
            .get(&format!("/subscribe/subscribers?page={page}"))
            .await
    }

    async fn set_status(&self, email: &str, status: SubscriberStatus) -> ApiResult<()> {
        let body = SubscriberStatusUpdate { email: email.to_string(), status };
        self.client.put_no_content("/subscribe/status", &body).await
    }

    async fn notify(&self, request: NotifyRequest, image: Option<PathBuf>) -> ApiResult<()> {
        match image {
            None => self.client.post_no_content("/subscribe/notify", &request).await,
            Some(path) => {
                let form = Form::new()
                    .text("subject", request.subject)
                    .text("body", request.body)
                    .part("image", file_part(&path).await?);
                self.client
                    .post_multipart_no_content("/subscribe/notify", form)
                    .await
            }
        }
    }
}

/// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::ApiError;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockSubscriberService {
        pub page: RwLock<Option<SubscriberPage>>,
        pub fail_next: RwLock<Option<ApiError>>,

        pub subscribe_calls: RwLock<Vec<String>>,
        pub page_calls: RwLock<Vec<u32>>,
        pub status_calls: RwLock<Vec<(String, SubscriberStatus)>>,
        pub notify_calls: RwLock<Vec<(NotifyRequest, Option<PathBuf>)>>,
    }

    impl MockSubscriberService {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn script_page(&self, page: SubscriberPage) {
            *self.page.write().await = Some(page);
        }

        pub async fn script_failure(&self, error: ApiError) {
            *self.fail_next.write().await = Some(error);
        }

        async fn take_failure(&self) -> Option<ApiError> {
            self.fail_next.write().await.take()
        }
    }

    #[async_trait]
    impl SubscriberService for MockSubscriberService {
        async fn subscribe(&self, email: &str) -> ApiResult<()> {
            self.subscribe_calls.write().await.push(email.to_string());
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }

        async fn subscribers(&self, page: u32) -> ApiResult<SubscriberPage> {
            self.page_calls.write().await.push(page);
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(self.page.read().await.clone().unwrap_or(SubscriberPage {
                subscribers: Vec::new(),
                page,
                per_page: 25,
                total: 0,
            }))
        }

        async fn set_status(&self, email: &str, status: SubscriberStatus) -> ApiResult<()> {
            self.status_calls
                .write()
                .await
                .push((email.to_string(), status));
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }

        async fn notify(&self, request: NotifyRequest, image: Option<PathBuf>) -> ApiResult<()> {
            self.notify_calls.write().await.push((request, image));
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }
    }
}
