//! Catalog commands: browse, search, show, purchase, review.

use anyhow::{Result, bail};
use clap::Subcommand;
use kinodeck_client::domains::{catalog, search};
use kinodeck_model::{PurchaseKind, RatingRequest, ReviewRequest};

use crate::config::Config;
use crate::render;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List one page of the catalog
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search titles by name
    Search {
        query: String,
        /// Search the external archive instead of the catalog
        #[arg(long)]
        archive: bool,
    },
    /// Show one title in full
    Show { movie_id: String },
    /// List the titles you have purchased
    Purchased,
    /// Purchase a title for streaming, or for download with --download
    Purchase {
        movie_id: String,
        #[arg(long)]
        download: bool,
    },
}

#[derive(Subcommand)]
pub enum ReviewAction {
    /// Leave a comment, optionally with a star rating
    Add {
        movie_id: String,
        #[arg(long)]
        comment: String,
        #[arg(long)]
        rating: Option<u8>,
    },
    /// Rate a title from 1 to 5
    Rate { movie_id: String, rating: u8 },
}

pub async fn run(action: CatalogAction, config: &Config) -> Result<()> {
    let mut engine = super::engine(config)?;
    match action {
        CatalogAction::List { page } => {
            engine.handle(catalog::Message::LoadPage(page)).await;
            let state = &engine.state().catalog.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if state.movies.is_empty() {
                println!("No titles on page {page}.");
            }
            for movie in &state.movies {
                println!("{}", render::movie_row(movie));
            }
        }
        CatalogAction::Search { query, archive } => {
            if archive {
                engine.handle(search::Message::SourceToggled).await;
            }
            engine.handle(search::Message::QueryChanged(query.clone())).await;
            // The debounce timer delivers the lookup; one step drains it.
            engine.step().await;
            let state = &engine.state().search.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if state.results.is_empty() {
                println!("No {} matches for \"{query}\".", state.source.label());
            }
            for movie in &state.results {
                println!("{}", render::movie_row(movie));
            }
        }
        CatalogAction::Show { movie_id } => {
            engine.handle(catalog::Message::LoadDetails(movie_id)).await;
            let state = &engine.state().catalog.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            match &state.details {
                Some(movie) => println!("{}", render::movie_details(movie)),
                None => bail!("title not found"),
            }
        }
        CatalogAction::Purchased => {
            engine.handle(catalog::Message::LoadPurchased).await;
            let state = &engine.state().catalog.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if state.purchased.is_empty() {
                println!("No purchases yet.");
            }
            for movie in &state.purchased {
                println!("{}", render::movie_row(movie));
            }
        }
        CatalogAction::Purchase { movie_id, download } => {
            // Fetch details first; the purchase gate checks the title's
            // download policy against what we have loaded.
            engine.handle(catalog::Message::LoadDetails(movie_id.clone())).await;
            if let Some(error) = &engine.state().catalog.state.error {
                bail!("{error}");
            }
            let kind = if download { PurchaseKind::Download } else { PurchaseKind::Stream };
            engine.handle(catalog::Message::Purchase { id: movie_id, kind }).await;
            let state = &engine.state().catalog.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if let Some(notice) = &state.notice {
                println!("{notice}");
            }
            if let Some(receipt) = &state.last_receipt {
                println!("{}", render::receipt(receipt));
            }
        }
    }
    Ok(())
}

pub async fn run_review(action: ReviewAction, config: &Config) -> Result<()> {
    let mut engine = super::engine(config)?;
    match action {
        ReviewAction::Add { movie_id, comment, rating } => {
            let review = ReviewRequest { rating, comment };
            engine.handle(catalog::Message::SubmitReview { id: movie_id, review }).await;
        }
        ReviewAction::Rate { movie_id, rating } => {
            let rating = RatingRequest { rating };
            engine.handle(catalog::Message::SubmitRating { id: movie_id, rating }).await;
        }
    }
    let state = &engine.state().catalog.state;
    if let Some(error) = &state.review_error {
        bail!("{error}");
    }
    if let Some(error) = &state.error {
        bail!("{error}");
    }
    if let Some(notice) = &state.notice {
        println!("{notice}");
    }
    Ok(())
}
