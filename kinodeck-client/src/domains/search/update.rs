//! Search domain update logic.

use super::messages::Message;
use super::{DEBOUNCE, SearchSource};
use crate::engine::{Effect, Updated};
use crate::state::State;

pub fn update(state: &mut State, message: Message) -> Updated {
    match message {
        Message::QueryChanged(query) => {
            state.search.state.query = query.clone();

            if query.trim().is_empty() {
                // A blank query clears locally; nothing is scheduled.
                state.search.state.results.clear();
                state.search.state.searching = false;
                state.search.state.error = None;
                return Updated::none();
            }

            Updated::one(Effect::delay(DEBOUNCE, Message::DebounceFired(query)))
        }

        Message::DebounceFired(query) => {
            // Only the timer for the query as it stands now executes;
            // timers for anything the user typed past die here.
            if state.search.state.query != query {
                return Updated::none();
            }

            state.search.state.searching = true;
            let source = state.search.state.source;
            let service = state.search.service.clone();

            Updated::one(Effect::future(async move {
                let result = match source {
                    SearchSource::Catalog => service.search(&query).await,
                    SearchSource::Archive => service.search_archive(&query).await,
                };
                Message::ResultsReceived { query, source, result }.into()
            }))
        }

        Message::ResultsReceived { query, source, result } => {
            // A response is only applied if the query and source it was
            // issued for are still current, regardless of arrival order.
            if state.search.state.query != query || state.search.state.source != source {
                return Updated::none();
            }

            state.search.state.searching = false;
            match result {
                Ok(results) => {
                    log::debug!(
                        "[Search] {} {} result(s) for '{query}'",
                        results.len(),
                        source.label()
                    );
                    // An empty list is an empty result, not a failure.
                    state.search.state.results = results;
                    state.search.state.error = None;
                }
                Err(error) => {
                    log::warn!("[Search] '{query}' failed: {error}");
                    state.search.state.error = Some(error.user_message("Search failed"));
                }
            }
            Updated::none()
        }

        Message::SourceToggled => {
            state.search.state.source = state.search.state.source.toggled();
            state.search.state.results.clear();
            state.search.state.error = None;

            let query = state.search.state.query.clone();
            if query.trim().is_empty() {
                return Updated::none();
            }

            // Re-run the standing query against the other source through
            // the same debounce as typing.
            Updated::one(Effect::delay(DEBOUNCE, Message::DebounceFired(query)))
        }

        Message::Clear => {
            state.search.state.query.clear();
            state.search.state.results.clear();
            state.search.state.searching = false;
            state.search.state.error = None;
            Updated::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::services::testing::mock_services;
    use kinodeck_model::Movie;

    fn state() -> State {
        let (services, _mocks) = mock_services();
        State::new(services)
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            genres: Vec::new(),
            release_date: None,
            avg_rating: None,
            view_price: None,
            download_price: None,
            currency: None,
            video_url: None,
            allow_download: false,
            filmmaker: None,
        }
    }

    #[test]
    fn keystroke_schedules_exactly_one_timer() {
        let mut state = state();

        let updated = update(&mut state, Message::QueryChanged("dune".into()));

        assert_eq!(updated.effects.len(), 1);
        assert_eq!(state.search.state.query, "dune");
        assert!(!state.search.state.searching);
    }

    #[test]
    fn blank_query_clears_without_scheduling() {
        let mut state = state();
        state.search.state.results = vec![movie("1", "Dune")];
        state.search.state.error = Some("old".into());

        let updated = update(&mut state, Message::QueryChanged("   ".into()));

        assert!(updated.is_empty());
        assert!(state.search.state.results.is_empty());
        assert!(state.search.state.error.is_none());
    }

    #[test]
    fn stale_debounce_timer_is_dropped() {
        let mut state = state();
        state.search.state.query = "dune part two".into();

        let updated = update(&mut state, Message::DebounceFired("dune".into()));

        assert!(updated.is_empty());
        assert!(!state.search.state.searching);
    }

    #[test]
    fn stale_results_never_overwrite_newer_ones() {
        let mut state = state();
        state.search.state.query = "beta".into();
        state.search.state.results = vec![movie("2", "Beta")];

        // A response for a query the user has already typed past.
        let updated = update(
            &mut state,
            Message::ResultsReceived {
                query: "alpha".into(),
                source: SearchSource::Catalog,
                result: Ok(vec![movie("1", "Alpha")]),
            },
        );

        assert!(updated.is_empty());
        assert_eq!(state.search.state.results[0].title, "Beta");
    }

    #[test]
    fn results_from_the_other_source_are_dropped() {
        let mut state = state();
        state.search.state.query = "dune".into();
        state.search.state.source = SearchSource::Catalog;

        update(
            &mut state,
            Message::ResultsReceived {
                query: "dune".into(),
                source: SearchSource::Archive,
                result: Ok(vec![movie("1", "Dune")]),
            },
        );

        assert!(state.search.state.results.is_empty());
    }

    #[test]
    fn failure_keeps_previous_results_and_surfaces_a_message() {
        let mut state = state();
        state.search.state.query = "dune".into();
        state.search.state.results = vec![movie("1", "Dune")];
        state.search.state.searching = true;

        update(
            &mut state,
            Message::ResultsReceived {
                query: "dune".into(),
                source: SearchSource::Catalog,
                result: Err(ApiError::Status(502)),
            },
        );

        assert!(!state.search.state.searching);
        assert_eq!(state.search.state.results.len(), 1);
        assert_eq!(state.search.state.error.as_deref(), Some("Search failed"));
    }

    #[test]
    fn toggling_the_source_reruns_the_standing_query() {
        let mut state = state();
        state.search.state.query = "dune".into();
        state.search.state.results = vec![movie("1", "Dune")];

        let updated = update(&mut state, Message::SourceToggled);

        assert_eq!(state.search.state.source, SearchSource::Archive);
        assert!(state.search.state.results.is_empty());
        assert_eq!(updated.effects.len(), 1);
    }

    #[test]
    fn toggling_with_no_query_schedules_nothing() {
        let mut state = state();

        let updated = update(&mut state, Message::SourceToggled);

        assert_eq!(state.search.state.source, SearchSource::Archive);
        assert!(updated.is_empty());
    }
}
