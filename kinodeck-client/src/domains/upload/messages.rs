//! Upload domain messages.

use std::path::PathBuf;

use kinodeck_model::Movie;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    TitleChanged(String),
    DescriptionChanged(String),
    CategoriesChanged(Vec<String>),
    ViewPriceChanged(Option<f32>),
    DownloadPriceChanged(Option<f32>),
    CurrencyChanged(Option<String>),
    AllowDownloadToggled(bool),
    VideoFilePicked(PathBuf),
    PosterFilePicked(PathBuf),
    TrailerFilePicked(Option<PathBuf>),
    /// Validate and, if clean, submit the form.
    Submit,
    /// The multipart upload settled.
    Settled(Result<Box<Movie>, ApiError>),
    /// Drop the form and every standing error or notice.
    Reset,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleChanged(_) => "Upload::TitleChanged",
            Self::DescriptionChanged(_) => "Upload::DescriptionChanged",
            Self::CategoriesChanged(_) => "Upload::CategoriesChanged",
            Self::ViewPriceChanged(_) => "Upload::ViewPriceChanged",
            Self::DownloadPriceChanged(_) => "Upload::DownloadPriceChanged",
            Self::CurrencyChanged(_) => "Upload::CurrencyChanged",
            Self::AllowDownloadToggled(_) => "Upload::AllowDownloadToggled",
            Self::VideoFilePicked(_) => "Upload::VideoFilePicked",
            Self::PosterFilePicked(_) => "Upload::PosterFilePicked",
            Self::TrailerFilePicked(_) => "Upload::TrailerFilePicked",
            Self::Submit => "Upload::Submit",
            Self::Settled(_) => "Upload::Settled",
            Self::Reset => "Upload::Reset",
        }
    }
}
