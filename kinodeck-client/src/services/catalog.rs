//! Catalog service: browsing, search, purchase, reviews.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use kinodeck_model::{
    Movie, MovieUploadMeta, PurchaseConfirmation, PurchaseKind, RatingRequest, ReviewRequest,
    normalize, normalize_batch,
};
use serde::Deserialize;
use serde_json::Value;

use crate::ApiClient;
use crate::error::{ApiError, ApiResult};

pub const CATALOG_PAGE_SIZE: u32 = 24;

#[async_trait]
pub trait CatalogService: Send + Sync + Debug {
    /// Fetch one page of the catalog. An empty page is a valid result.
    async fn list_movies(&self, page: u32) -> ApiResult<Vec<Movie>>;

    /// Fetch a single title by its backend id.
    async fn movie(&self, id: &str) -> ApiResult<Movie>;

    /// Search platform-native titles.
    async fn search(&self, query: &str) -> ApiResult<Vec<Movie>>;

    /// Search the metadata archive.
    async fn search_archive(&self, query: &str) -> ApiResult<Vec<Movie>>;

    /// Titles the signed-in viewer has bought.
    async fn purchased(&self) -> ApiResult<Vec<Movie>>;

    /// Buy a title for streaming or download.
    async fn purchase(&self, id: &str, kind: PurchaseKind) -> ApiResult<PurchaseConfirmation>;

    async fn submit_review(&self, id: &str, review: ReviewRequest) -> ApiResult<()>;

    async fn submit_rating(&self, id: &str, rating: RatingRequest) -> ApiResult<()>;

    /// Update a title's metadata (filmmaker manage view).
    async fn update_movie(&self, id: &str, meta: MovieUploadMeta) -> ApiResult<()>;

    /// Remove a title (filmmaker manage view).
    async fn delete_movie(&self, id: &str) -> ApiResult<()>;
}

/// [`CatalogService`] over the live API.
#[derive(Debug, Clone)]
pub struct CatalogApiAdapter {
    client: Arc<ApiClient>,
}

impl CatalogApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch a raw payload and normalize whatever list shape came back.
    async fn fetch_batch(&self, path: &str) -> ApiResult<Vec<Movie>> {
        let value: Value = self.client.get(path).await?;
        Ok(normalize_batch(&value))
    }
}

/// The slice of a purchase response the backend actually guarantees.
#[derive(Debug, Default, Deserialize)]
struct PurchaseReceipt {
    #[serde(default)]
    amount: Option<f32>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

#[async_trait]
impl CatalogService for CatalogApiAdapter {
    async fn list_movies(&self, page: u32) -> ApiResult<Vec<Movie>> {
        self.fetch_batch(&format!("/movies?page={page}&per_page={CATALOG_PAGE_SIZE}"))
            .await
    }

    async fn movie(&self, id: &str) -> ApiResult<Movie> {
        let value: Value = self
            .client
            .get(&format!("/movies/{}", urlencoding::encode(id)))
            .await?;
        normalize(Some(&value))
            .ok_or_else(|| ApiError::Decode("movie payload missing id or title".into()))
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<Movie>> {
        self.fetch_batch(&format!(
            "/movies/search?query={}",
            urlencoding::encode(query)
        ))
        .await
    }

    async fn search_archive(&self, query: &str) -> ApiResult<Vec<Movie>> {
        self.fetch_batch(&format!(
            "/archive/search?query={}",
            urlencoding::encode(query)
        ))
        .await
    }

    async fn purchased(&self) -> ApiResult<Vec<Movie>> {
        self.fetch_batch("/movies/user/purchased").await
    }

    async fn purchase(&self, id: &str, kind: PurchaseKind) -> ApiResult<PurchaseConfirmation> {
        let body = serde_json::json!({ "kind": kind });
        let value: Value = self
            .client
            .post(&format!("/movies/{}/purchase", urlencoding::encode(id)), &body)
            .await?;

        // The receipt fields are best-effort; the purchase itself already
        // succeeded by the time we are decoding.
        let receipt: PurchaseReceipt = serde_json::from_value(value).unwrap_or_default();
        Ok(PurchaseConfirmation {
            movie_id: id.to_string(),
            kind,
            amount: receipt.amount,
            currency: receipt.currency,
            reference: receipt.reference,
        })
    }

    async fn submit_review(&self, id: &str, review: ReviewRequest) -> ApiResult<()> {
        self.client
            .post_no_content(&format!("/movies/{}/reviews", urlencoding::encode(id)), &review)
            .await
    }

    async fn submit_rating(&self, id: &str, rating: RatingRequest) -> ApiResult<()> {
        self.client
            .post_no_content(&format!("/movies/{}/rating", urlencoding::encode(id)), &rating)
            .await
    }

    async fn update_movie(&self, id: &str, meta: MovieUploadMeta) -> ApiResult<()> {
        self.client
            .put_no_content(&format!("/movies/{}", urlencoding::encode(id)), &meta)
            .await
    }

    async fn delete_movie(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete_no_content(&format!("/movies/{}", urlencoding::encode(id)))
            .await
    }
}

/// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockCatalogService {
        pub movies: RwLock<Vec<Movie>>,
        pub search_results: RwLock<Vec<Movie>>,
        pub archive_results: RwLock<Vec<Movie>>,
        pub purchased_titles: RwLock<Vec<Movie>>,
        pub fail_next: RwLock<Option<ApiError>>,

        pub list_calls: RwLock<Vec<u32>>,
        pub search_calls: RwLock<Vec<String>>,
        pub archive_calls: RwLock<Vec<String>>,
        pub purchase_calls: RwLock<Vec<(String, PurchaseKind)>>,
        pub review_calls: RwLock<Vec<(String, ReviewRequest)>>,
        pub rating_calls: RwLock<Vec<(String, RatingRequest)>>,
    }

    impl MockCatalogService {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn script_movies(&self, movies: Vec<Movie>) {
            *self.movies.write().await = movies;
        }

        pub async fn script_search_results(&self, movies: Vec<Movie>) {
            *self.search_results.write().await = movies;
        }

        pub async fn script_failure(&self, error: ApiError) {
            *self.fail_next.write().await = Some(error);
        }

        async fn take_failure(&self) -> Option<ApiError> {
            self.fail_next.write().await.take()
        }
    }

    #[async_trait]
    impl CatalogService for MockCatalogService {
        async fn list_movies(&self, page: u32) -> ApiResult<Vec<Movie>> {
            self.list_calls.write().await.push(page);
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(self.movies.read().await.clone())
        }

        async fn movie(&self, id: &str) -> ApiResult<Movie> {
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            self.movies
                .read()
                .await
                .iter()
                .find(|movie| movie.id == id)
                .cloned()
                .ok_or(ApiError::Status(404))
        }

        async fn search(&self, query: &str) -> ApiResult<Vec<Movie>> {
            self.search_calls.write().await.push(query.to_string());
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(self.search_results.read().await.clone())
        }

        async fn search_archive(&self, query: &str) -> ApiResult<Vec<Movie>> {
            self.archive_calls.write().await.push(query.to_string());
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(self.archive_results.read().await.clone())
        }

        async fn purchased(&self) -> ApiResult<Vec<Movie>> {
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(self.purchased_titles.read().await.clone())
        }

        async fn purchase(&self, id: &str, kind: PurchaseKind) -> ApiResult<PurchaseConfirmation> {
            self.purchase_calls.write().await.push((id.to_string(), kind));
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(PurchaseConfirmation {
                movie_id: id.to_string(),
                kind,
                amount: Some(2.99),
                currency: Some("USD".into()),
                reference: Some("ref-test".into()),
            })
        }

        async fn submit_review(&self, id: &str, review: ReviewRequest) -> ApiResult<()> {
            self.review_calls.write().await.push((id.to_string(), review));
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }

        async fn submit_rating(&self, id: &str, rating: RatingRequest) -> ApiResult<()> {
            self.rating_calls.write().await.push((id.to_string(), rating));
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }

        async fn update_movie(&self, _id: &str, _meta: MovieUploadMeta) -> ApiResult<()> {
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }

        async fn delete_movie(&self, _id: &str) -> ApiResult<()> {
            if let Some(error) = self.take_failure().await {
                return Err(error);
            }
            Ok(())
        }
    }
}
