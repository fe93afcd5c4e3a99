//! Movie submission: feed the upload form from flags, then submit.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use kinodeck_client::domains::upload;

use crate::config::Config;

#[derive(Args)]
pub struct UploadArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Repeatable; one category per flag
    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[arg(long)]
    pub view_price: Option<f32>,

    #[arg(long)]
    pub download_price: Option<f32>,

    /// Required whenever a price is set
    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub allow_download: bool,

    /// Path to the video file
    #[arg(long)]
    pub video: PathBuf,

    /// Path to the poster image
    #[arg(long)]
    pub poster: PathBuf,

    /// Path to an optional trailer
    #[arg(long)]
    pub trailer: Option<PathBuf>,
}

pub async fn run(args: UploadArgs, config: &Config) -> Result<()> {
    let mut engine = super::engine(config)?;

    engine.handle(upload::Message::TitleChanged(args.title)).await;
    engine.handle(upload::Message::DescriptionChanged(args.description)).await;
    engine.handle(upload::Message::CategoriesChanged(args.categories)).await;
    engine.handle(upload::Message::ViewPriceChanged(args.view_price)).await;
    engine.handle(upload::Message::DownloadPriceChanged(args.download_price)).await;
    engine.handle(upload::Message::CurrencyChanged(args.currency)).await;
    engine.handle(upload::Message::AllowDownloadToggled(args.allow_download)).await;
    engine.handle(upload::Message::VideoFilePicked(args.video)).await;
    engine.handle(upload::Message::PosterFilePicked(args.poster)).await;
    engine.handle(upload::Message::TrailerFilePicked(args.trailer)).await;

    engine.handle(upload::Message::Submit).await;

    let state = &engine.state().upload.state;
    if !state.field_errors.is_empty() {
        let mut lines = vec!["the submission is invalid:".to_string()];
        for error in &state.field_errors {
            lines.push(format!("  {}: {}", error.field, error.message));
        }
        bail!("{}", lines.join("\n"));
    }
    if let Some(error) = &state.error {
        bail!("{error}");
    }
    if let Some(notice) = &state.notice {
        println!("{notice}");
    }
    Ok(())
}
