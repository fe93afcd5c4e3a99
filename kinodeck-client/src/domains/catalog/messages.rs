//! Catalog domain messages.

use kinodeck_model::{Movie, PurchaseConfirmation, PurchaseKind, RatingRequest, ReviewRequest};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    LoadPage(u32),
    PageLoaded {
        page: u32,
        result: Result<Vec<Movie>, ApiError>,
    },
    LoadDetails(String),
    DetailsLoaded {
        id: String,
        result: Result<Box<Movie>, ApiError>,
    },
    Purchase {
        id: String,
        kind: PurchaseKind,
    },
    PurchaseSettled {
        id: String,
        result: Result<PurchaseConfirmation, ApiError>,
    },
    LoadPurchased,
    PurchasedLoaded(Result<Vec<Movie>, ApiError>),
    SubmitReview {
        id: String,
        review: ReviewRequest,
    },
    ReviewSettled {
        id: String,
        result: Result<(), ApiError>,
    },
    SubmitRating {
        id: String,
        rating: RatingRequest,
    },
    RatingSettled {
        id: String,
        result: Result<(), ApiError>,
    },
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadPage(_) => "Catalog::LoadPage",
            Self::PageLoaded { .. } => "Catalog::PageLoaded",
            Self::LoadDetails(_) => "Catalog::LoadDetails",
            Self::DetailsLoaded { .. } => "Catalog::DetailsLoaded",
            Self::Purchase { .. } => "Catalog::Purchase",
            Self::PurchaseSettled { .. } => "Catalog::PurchaseSettled",
            Self::LoadPurchased => "Catalog::LoadPurchased",
            Self::PurchasedLoaded(_) => "Catalog::PurchasedLoaded",
            Self::SubmitReview { .. } => "Catalog::SubmitReview",
            Self::ReviewSettled { .. } => "Catalog::ReviewSettled",
            Self::SubmitRating { .. } => "Catalog::SubmitRating",
            Self::RatingSettled { .. } => "Catalog::RatingSettled",
        }
    }
}
