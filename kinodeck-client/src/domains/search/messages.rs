//! Search domain messages.

use kinodeck_model::Movie;

use super::SearchSource;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    /// A keystroke in the search box.
    QueryChanged(String),
    /// Flip between catalog and archive search.
    SourceToggled,
    /// The quiet period for this query elapsed.
    DebounceFired(String),
    /// A lookup settled. Tagged with the query and source it was issued
    /// for so stale responses can be dropped.
    ResultsReceived {
        query: String,
        source: SearchSource,
        result: Result<Vec<Movie>, ApiError>,
    },
    /// Drop the query and results.
    Clear,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::QueryChanged(_) => "Search::QueryChanged",
            Self::SourceToggled => "Search::SourceToggled",
            Self::DebounceFired(_) => "Search::DebounceFired",
            Self::ResultsReceived { .. } => "Search::ResultsReceived",
            Self::Clear => "Search::Clear",
        }
    }
}
