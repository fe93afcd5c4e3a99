//! Catalog domain update logic.

use kinodeck_model::PurchaseKind;

use super::messages::Message;
use crate::engine::{Effect, Updated};
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::LoadPage(page) => {
            state.catalog.state.loading = true;
            state.catalog.state.page = page;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.list_movies(page).await;
                Message::PageLoaded { page, result }.into()
            }))
        }

        Message::PageLoaded { page, result } => {
            // The user may have paged on; only the current page applies.
            if state.catalog.state.page != page {
                return Updated::none();
            }

            state.catalog.state.loading = false;
            match result {
                Ok(movies) => {
                    // An empty page is a valid end-of-catalog result.
                    log::debug!("[Catalog] page {page}: {} title(s)", movies.len());
                    state.catalog.state.movies = movies;
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    log::error!("[Catalog] page {page} failed: {error}");
                    state.catalog.state.error =
                        Some(error.user_message("Could not load the catalog"));
                }
            }
            Updated::none()
        }

        Message::LoadDetails(id) => {
            state.catalog.state.loading = true;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.movie(&id).await.map(Box::new);
                Message::DetailsLoaded { id, result }.into()
            }))
        }

        Message::DetailsLoaded { id, result } => {
            state.catalog.state.loading = false;
            match result {
                Ok(movie) => {
                    state.catalog.state.details = Some(*movie);
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    log::error!("[Catalog] details for {id} failed: {error}");
                    state.catalog.state.error =
                        Some(error.user_message("Could not load that title"));
                }
            }
            Updated::none()
        }

        Message::Purchase { id, kind } => {
            if state.catalog.state.purchasing.is_some() {
                log::warn!("[Catalog] purchase of {id} ignored while another is in flight");
                return Updated::none();
            }

            // Stream-only titles cannot be bought for download; caught
            // here so no request is ever made.
            if kind == PurchaseKind::Download {
                if let Some(movie) = state.catalog.state.find_movie(&id) {
                    if !movie.allow_download {
                        state.catalog.state.error =
                            Some("This title is available for streaming only".into());
                        return Updated::none();
                    }
                }
            }

            state.catalog.state.purchasing = Some(id.clone());
            state.catalog.state.error = None;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.purchase(&id, kind).await;
                Message::PurchaseSettled { id, result }.into()
            }))
        }

        Message::PurchaseSettled { id, result } => {
            state.catalog.state.purchasing = None;
            match result {
                Ok(receipt) => {
                    log::info!("[Catalog] purchased {id} ({})", receipt.kind.as_str());
                    state.catalog.state.last_receipt = Some(receipt);
                    state.catalog.state.notice = Some("Purchase complete".into());
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    log::error!("[Catalog] purchase of {id} failed: {error}");
                    state.catalog.state.error = Some(error.user_message("Purchase failed"));
                }
            }
            Updated::none()
        }

        Message::LoadPurchased => {
            state.catalog.state.loading = true;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                Message::PurchasedLoaded(service.purchased().await).into()
            }))
        }

        Message::PurchasedLoaded(result) => {
            state.catalog.state.loading = false;
            match result {
                Ok(movies) => {
                    state.catalog.state.purchased = movies;
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    state.catalog.state.error =
                        Some(error.user_message("Could not load your purchases"));
                }
            }
            Updated::none()
        }

        Message::SubmitReview { id, review } => {
            if review.comment.trim().is_empty() {
                state.catalog.state.review_error = Some("A review needs a comment".into());
                return Updated::none();
            }
            if let Some(rating) = review.rating {
                if !(1..=5).contains(&rating) {
                    state.catalog.state.review_error =
                        Some("Rating must be between 1 and 5".into());
                    return Updated::none();
                }
            }

            state.catalog.state.review_error = None;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.submit_review(&id, review).await;
                Message::ReviewSettled { id, result }.into()
            }))
        }

        Message::ReviewSettled { id, result } => {
            match result {
                Ok(()) => {
                    state.catalog.state.notice = Some("Review submitted".into());
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    log::error!("[Catalog] review for {id} failed: {error}");
                    state.catalog.state.error =
                        Some(error.user_message("Could not submit the review"));
                }
            }
            Updated::none()
        }

        Message::SubmitRating { id, rating } => {
            if !(1..=5).contains(&rating.rating) {
                state.catalog.state.review_error =
                    Some("Rating must be between 1 and 5".into());
                return Updated::none();
            }

            state.catalog.state.review_error = None;
            let service = state.catalog.service.clone();
            Updated::one(Effect::future(async move {
                let result = service.submit_rating(&id, rating).await;
                Message::RatingSettled { id, result }.into()
            }))
        }

        Message::RatingSettled { id, result } => {
            match result {
                Ok(()) => {
                    state.catalog.state.notice = Some("Rating saved".into());
                    state.catalog.state.error = None;
                }
                Err(error) => {
                    log::error!("[Catalog] rating for {id} failed: {error}");
                    state.catalog.state.error =
                        Some(error.user_message("Could not save the rating"));
                }
            }
            Updated::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::error::ApiError;
    use crate::services::testing::mock_services;
    use kinodeck_model::{Movie, ReviewRequest};

    fn movie(id: &str, title: &str, allow_download: bool) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            genres: Vec::new(),
            release_date: None,
            avg_rating: None,
            view_price: Some(3.99),
            download_price: allow_download.then_some(9.99),
            currency: Some("USD".into()),
            video_url: None,
            allow_download,
            filmmaker: None,
        }
    }

    fn state() -> State {
        let (services, _mocks) = mock_services();
        State::new(services)
    }

    #[test]
    fn stale_page_responses_are_dropped() {
        let mut state = state();
        update(&mut state, Message::LoadPage(1));
        update(&mut state, Message::LoadPage(2));

        update(
            &mut state,
            Message::PageLoaded { page: 1, result: Ok(vec![movie("1", "Old", false)]) },
        );

        // Still waiting on page 2.
        assert!(state.catalog.state.movies.is_empty());
        assert!(state.catalog.state.loading);
    }

    #[test]
    fn empty_page_is_not_an_error() {
        let mut state = state();
        update(&mut state, Message::LoadPage(9));

        update(&mut state, Message::PageLoaded { page: 9, result: Ok(Vec::new()) });

        assert!(state.catalog.state.movies.is_empty());
        assert!(state.catalog.state.error.is_none());
        assert!(!state.catalog.state.loading);
    }

    #[test]
    fn download_purchase_of_a_stream_only_title_never_leaves_the_client() {
        let mut state = state();
        state.catalog.state.movies = vec![movie("42", "Stream Only", false)];

        let updated = update(
            &mut state,
            Message::Purchase { id: "42".into(), kind: PurchaseKind::Download },
        );

        assert!(updated.is_empty());
        assert!(state.catalog.state.purchasing.is_none());
        assert_eq!(
            state.catalog.state.error.as_deref(),
            Some("This title is available for streaming only")
        );
    }

    #[test]
    fn second_purchase_while_one_is_in_flight_is_ignored() {
        let mut state = state();
        state.catalog.state.movies =
            vec![movie("1", "First", true), movie("2", "Second", true)];

        update(&mut state, Message::Purchase { id: "1".into(), kind: PurchaseKind::Stream });
        let updated =
            update(&mut state, Message::Purchase { id: "2".into(), kind: PurchaseKind::Stream });

        assert!(updated.is_empty());
        assert_eq!(state.catalog.state.purchasing.as_deref(), Some("1"));
    }

    #[test]
    fn failed_purchase_releases_the_gate() {
        let mut state = state();
        state.catalog.state.movies = vec![movie("1", "First", true)];
        update(&mut state, Message::Purchase { id: "1".into(), kind: PurchaseKind::Stream });

        update(
            &mut state,
            Message::PurchaseSettled {
                id: "1".into(),
                result: Err(ApiError::Server { status: 402, message: "card declined".into() }),
            },
        );

        assert!(state.catalog.state.purchasing.is_none());
        assert_eq!(state.catalog.state.error.as_deref(), Some("card declined"));
    }

    #[test]
    fn review_without_a_comment_is_rejected_locally() {
        let mut state = state();

        let updated = update(
            &mut state,
            Message::SubmitReview {
                id: "1".into(),
                review: ReviewRequest { rating: None, comment: "  ".into() },
            },
        );

        assert!(updated.is_empty());
        assert_eq!(
            state.catalog.state.review_error.as_deref(),
            Some("A review needs a comment")
        );
        // The form error stays out of the domain error slot.
        assert!(state.catalog.state.error.is_none());
    }

    #[test]
    fn out_of_range_review_rating_is_rejected_locally() {
        let mut state = state();

        let updated = update(
            &mut state,
            Message::SubmitReview {
                id: "1".into(),
                review: ReviewRequest { rating: Some(6), comment: "great".into() },
            },
        );

        assert!(updated.is_empty());
        assert!(state.catalog.state.review_error.is_some());
    }

    #[tokio::test]
    async fn purchase_end_to_end_records_a_receipt() {
        let (services, mocks) = mock_services();
        mocks
            .catalog
            .script_movies(vec![movie("42", "Dune", true)])
            .await;

        let mut engine = Engine::new(State::new(services));
        engine.handle(Message::LoadPage(1)).await;
        engine
            .handle(Message::Purchase { id: "42".into(), kind: PurchaseKind::Download })
            .await;

        {
            let calls = mocks.catalog.purchase_calls.read().await;
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0], ("42".to_string(), PurchaseKind::Download));
        }

        let catalog = &engine.state().catalog.state;
        assert!(catalog.purchasing.is_none());
        assert_eq!(catalog.notice.as_deref(), Some("Purchase complete"));
        let receipt = catalog.last_receipt.as_ref().unwrap();
        assert_eq!(receipt.movie_id, "42");
        assert_eq!(receipt.kind, PurchaseKind::Download);
    }
}
