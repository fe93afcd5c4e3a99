//! Debounced search over two result sources.
//!
//! Every keystroke schedules a delayed [`Message::DebounceFired`]
//! carrying the query as typed. When a timer lands, it only executes if
//! its query still matches the live one, so a burst of keystrokes
//! collapses to a single lookup for whatever the user settled on.

pub mod messages;
pub mod update;

use std::time::Duration;

use kinodeck_model::Movie;

pub use messages::Message;
pub use update::update;

/// Quiet period between the last keystroke and the lookup it triggers.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Which backend a query runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchSource {
    /// Platform-native titles.
    #[default]
    Catalog,
    /// The external metadata archive.
    Archive,
}

impl SearchSource {
    pub fn toggled(&self) -> Self {
        match self {
            SearchSource::Catalog => SearchSource::Archive,
            SearchSource::Archive => SearchSource::Catalog,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchSource::Catalog => "catalog",
            SearchSource::Archive => "archive",
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchState {
    /// The query as currently typed. Every guard compares against this.
    pub query: String,
    pub source: SearchSource,
    pub results: Vec<Movie>,
    /// True from the moment a lookup is issued until it settles.
    pub searching: bool,
    pub error: Option<String>,
}
