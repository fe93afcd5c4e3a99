//! Catalog domain: browsing, details, purchase, reviews and ratings.

pub mod messages;
pub mod update;

use kinodeck_model::{Movie, PurchaseConfirmation};

pub use messages::Message;
pub use update::update;

#[derive(Debug, Default)]
pub struct CatalogState {
    pub movies: Vec<Movie>,
    /// Page the movie list currently shows (1-based; 0 until loaded).
    pub page: u32,
    pub loading: bool,
    pub details: Option<Movie>,
    pub purchased: Vec<Movie>,
    /// Id of the title with a purchase in flight, if any. Works like the
    /// admin busy gate: occupied means further purchases are ignored.
    pub purchasing: Option<String>,
    pub last_receipt: Option<PurchaseConfirmation>,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Validation message for the review form, scoped to that form.
    pub review_error: Option<String>,
}

impl CatalogState {
    /// Look a title up wherever we have already seen it.
    pub fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.details
            .as_ref()
            .filter(|movie| movie.id == id)
            .or_else(|| self.movies.iter().find(|movie| movie.id == id))
            .or_else(|| self.purchased.iter().find(|movie| movie.id == id))
    }
}
