//! Upload domain update logic.

use super::form::UploadForm;
use super::messages::Message;
use crate::engine::{Effect, Updated};
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    let upload = &mut state.upload.state;
    match message {
        Message::TitleChanged(title) => {
            upload.form.title = title;
            clear_field(upload, "title");
            Updated::none()
        }
        Message::DescriptionChanged(description) => {
            upload.form.description = description;
            Updated::none()
        }
        Message::CategoriesChanged(categories) => {
            upload.form.categories = categories;
            Updated::none()
        }
        Message::ViewPriceChanged(price) => {
            upload.form.view_price = price;
            clear_field(upload, "view_price");
            Updated::none()
        }
        Message::DownloadPriceChanged(price) => {
            upload.form.download_price = price;
            clear_field(upload, "download_price");
            Updated::none()
        }
        Message::CurrencyChanged(currency) => {
            upload.form.currency = currency;
            clear_field(upload, "currency");
            Updated::none()
        }
        Message::AllowDownloadToggled(allow) => {
            upload.form.allow_download = allow;
            Updated::none()
        }
        Message::VideoFilePicked(path) => {
            upload.form.video_file = Some(path);
            clear_field(upload, "video_file");
            Updated::none()
        }
        Message::PosterFilePicked(path) => {
            upload.form.poster_file = Some(path);
            clear_field(upload, "poster_file");
            Updated::none()
        }
        Message::TrailerFilePicked(path) => {
            upload.form.trailer_file = path;
            Updated::none()
        }

        Message::Submit => {
            if upload.submitting {
                return Updated::none();
            }

            let errors = upload.form.validate();
            if !errors.is_empty() {
                log::debug!("[Upload] submit blocked: {} field error(s)", errors.len());
                upload.field_errors = errors;
                return Updated::none();
            }

            // validate() guarantees both files are present.
            let (Some(video), Some(poster)) =
                (upload.form.video_file.clone(), upload.form.poster_file.clone())
            else {
                return Updated::none();
            };

            upload.submitting = true;
            upload.field_errors.clear();
            upload.error = None;
            let meta = upload.form.meta();
            let trailer = upload.form.trailer_file.clone();
            let service = state.upload.service.clone();

            Updated::one(Effect::future(async move {
                let result = service
                    .upload_movie(meta, video, poster, trailer)
                    .await
                    .map(Box::new);
                Message::Settled(result).into()
            }))
        }

        Message::Settled(result) => {
            upload.submitting = false;
            match result {
                Ok(movie) => {
                    log::info!("[Upload] \"{}\" submitted for review", movie.title);
                    upload.notice =
                        Some(format!("\"{}\" was submitted for review", movie.title));
                    upload.error = None;
                    upload.form = UploadForm::default();
                }
                Err(error) => {
                    // The form survives so nothing has to be retyped.
                    log::error!("[Upload] submit failed: {error}");
                    upload.error = Some(error.user_message("Upload failed"));
                }
            }
            Updated::none()
        }

        Message::Reset => {
            upload.form = UploadForm::default();
            upload.field_errors.clear();
            upload.notice = None;
            upload.error = None;
            Updated::none()
        }
    }
}

fn clear_field(upload: &mut super::UploadState, field: &str) {
    upload.field_errors.retain(|error| error.field != field);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::engine::Engine;
    use crate::error::ApiError;
    use crate::services::testing::mock_services;

    fn state() -> State {
        let (services, _mocks) = mock_services();
        State::new(services)
    }

    fn fill_complete(state: &mut State) {
        update(state, Message::TitleChanged("Sunset Reel".into()));
        update(state, Message::DescriptionChanged("A short film".into()));
        update(state, Message::VideoFilePicked(PathBuf::from("/tmp/sunset.mp4")));
        update(state, Message::PosterFilePicked(PathBuf::from("/tmp/sunset.jpg")));
    }

    #[test]
    fn submit_with_missing_poster_stays_local() {
        let mut state = state();
        update(&mut state, Message::TitleChanged("Sunset Reel".into()));
        update(&mut state, Message::VideoFilePicked(PathBuf::from("/tmp/sunset.mp4")));

        let updated = update(&mut state, Message::Submit);

        assert!(updated.is_empty());
        assert!(state.upload.state.field_error("poster_file").is_some());
        assert!(!state.upload.state.submitting);
    }

    #[test]
    fn fixing_a_field_clears_only_its_error() {
        let mut state = state();
        update(&mut state, Message::Submit);
        assert!(state.upload.state.field_error("title").is_some());
        assert!(state.upload.state.field_error("video_file").is_some());

        update(&mut state, Message::TitleChanged("Sunset Reel".into()));

        assert!(state.upload.state.field_error("title").is_none());
        assert!(state.upload.state.field_error("video_file").is_some());
    }

    #[test]
    fn double_submit_while_uploading_is_ignored() {
        let mut state = state();
        fill_complete(&mut state);

        let first = update(&mut state, Message::Submit);
        let second = update(&mut state, Message::Submit);

        assert_eq!(first.effects.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn failed_upload_preserves_the_form() {
        let mut state = state();
        fill_complete(&mut state);
        update(&mut state, Message::Submit);

        update(
            &mut state,
            Message::Settled(Err(ApiError::Server {
                status: 413,
                message: "File too large".into(),
            })),
        );

        assert_eq!(state.upload.state.form.title, "Sunset Reel");
        assert_eq!(state.upload.state.error.as_deref(), Some("File too large"));
        assert!(!state.upload.state.submitting);
    }

    #[tokio::test]
    async fn invalid_form_makes_no_network_call() {
        let (services, mocks) = mock_services();
        let mut engine = Engine::new(State::new(services));

        engine.handle(Message::TitleChanged("Sunset Reel".into())).await;
        engine
            .handle(Message::VideoFilePicked(PathBuf::from("/tmp/sunset.mp4")))
            .await;
        engine.handle(Message::Submit).await;

        assert!(mocks.upload.upload_calls.read().await.is_empty());
        assert!(engine.state().upload.state.field_error("poster_file").is_some());
    }

    #[tokio::test]
    async fn successful_upload_resets_the_form() {
        let (services, mocks) = mock_services();
        let mut engine = Engine::new(State::new(services));

        engine.handle(Message::TitleChanged("Sunset Reel".into())).await;
        engine
            .handle(Message::VideoFilePicked(PathBuf::from("/tmp/sunset.mp4")))
            .await;
        engine
            .handle(Message::PosterFilePicked(PathBuf::from("/tmp/sunset.jpg")))
            .await;
        engine.handle(Message::Submit).await;

        {
            let calls = mocks.upload.upload_calls.read().await;
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].0.title, "Sunset Reel");
            assert_eq!(calls[0].1, PathBuf::from("/tmp/sunset.mp4"));
        }

        let upload = &engine.state().upload.state;
        assert_eq!(upload.form, UploadForm::default());
        assert_eq!(
            upload.notice.as_deref(),
            Some("\"Sunset Reel\" was submitted for review")
        );
    }
}
