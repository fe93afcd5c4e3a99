//! Authenticated HTTP client for the platform API.
//!
//! One HTTP call per invocation, no retries. Payloads are unwrapped
//! through the envelope tolerance in `kinodeck_model::envelope` before
//! the typed decode, and non-2xx responses are mapped to the
//! [`ApiError`] taxonomy with whatever message the server supplied.

use std::time::Duration;

use kinodeck_model::{extract_error_message, unwrap_data};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API client with bearer authentication.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: Url, session: SessionStore) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::from)?;

        log::info!("[ApiClient] base URL: {base_url}");

        Ok(Self { client, base_url, session })
    }

    /// Parse and validate a base URL string first.
    pub fn from_str(base_url: &str, session: SessionStore) -> ApiResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        Self::new(url, session)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach the bearer header when a token is present. An absent token
    /// sends the request as-is; authorization is the server's call.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Execute a request expecting a JSON payload.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.failure(response).await);
        }

        let body: Value = response.json().await?;
        unwrap_data(body).map_err(ApiError::from)
    }

    /// Execute a request where only the status matters; any body is
    /// ignored.
    async fn execute_no_content(&self, request: RequestBuilder) -> ApiResult<()> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }
        Err(self.failure(response).await)
    }

    /// Map a non-2xx response onto the error taxonomy. A 401 drops the
    /// in-memory token; the persisted session is left alone.
    async fn failure(&self, response: Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate();
        }

        let status = status.as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<Value>(&body)
                .ok()
                .as_ref()
                .and_then(extract_error_message),
            Err(_) => None,
        };

        match message {
            Some(message) => {
                log::warn!("[ApiClient] request failed ({status}): {message}");
                ApiError::Server { status, message }
            }
            None => {
                log::warn!("[ApiClient] request failed ({status}), no server message");
                ApiError::Status(status)
            }
        }
    }

    // Public verbs

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] GET {url}");
        let request = self.authorize(self.client.get(&url));
        self.execute(request).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] POST {url}");
        let request = self.authorize(self.client.post(&url).json(body));
        self.execute(request).await
    }

    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] POST {url}");
        let request = self.authorize(self.client.post(&url).json(body));
        self.execute_no_content(request).await
    }

    pub async fn put_no_content<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] PUT {url}");
        let request = self.authorize(self.client.put(&url).json(body));
        self.execute_no_content(request).await
    }

    /// PUT with an empty JSON body, for endpoints that take no input.
    pub async fn put_empty(&self, path: &str) -> ApiResult<()> {
        self.put_no_content(path, &serde_json::json!({})).await
    }

    pub async fn delete_no_content(&self, path: &str) -> ApiResult<()> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] DELETE {url}");
        let request = self.authorize(self.client.delete(&url));
        self.execute_no_content(request).await
    }

    /// POST carrying an `Idempotency-Key` header, for monetary endpoints
    /// where the backend may deduplicate repeats of the same decision.
    pub async fn post_idempotent_no_content<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Uuid,
    ) -> ApiResult<()> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] POST {url} (idempotency key {idempotency_key})");
        let request = self.authorize(
            self.client
                .post(&url)
                .header("Idempotency-Key", idempotency_key.to_string())
                .json(body),
        );
        self.execute_no_content(request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] POST {url} (multipart)");
        let request = self.authorize(self.client.post(&url).multipart(form));
        self.execute(request).await
    }

    pub async fn post_multipart_no_content(&self, path: &str, form: Form) -> ApiResult<()> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] POST {url} (multipart)");
        let request = self.authorize(self.client.post(&url).multipart(form));
        self.execute_no_content(request).await
    }
}
