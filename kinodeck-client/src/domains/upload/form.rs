//! The upload form and its validation.

use std::path::PathBuf;

use kinodeck_model::MovieUploadMeta;

/// A validation failure scoped to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub view_price: Option<f32>,
    pub download_price: Option<f32>,
    pub currency: Option<String>,
    pub allow_download: bool,
    pub video_file: Option<PathBuf>,
    pub poster_file: Option<PathBuf>,
    pub trailer_file: Option<PathBuf>,
}

impl UploadForm {
    /// Check the whole form at once so the operator fixes every failing
    /// field in one pass. Pure; touches nothing outside the form.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.video_file.is_none() {
            errors.push(FieldError::new("video_file", "A video file is required"));
        }
        if self.poster_file.is_none() {
            errors.push(FieldError::new("poster_file", "A poster image is required"));
        }
        if let Some(price) = self.view_price {
            if price < 0.0 {
                errors.push(FieldError::new("view_price", "Price cannot be negative"));
            }
        }
        if let Some(price) = self.download_price {
            if price < 0.0 {
                errors.push(FieldError::new("download_price", "Price cannot be negative"));
            }
        }
        let priced = self.view_price.is_some() || self.download_price.is_some();
        if priced && self.currency.as_deref().is_none_or(|c| c.trim().is_empty()) {
            errors.push(FieldError::new(
                "currency",
                "Currency is required when a price is set",
            ));
        }

        errors
    }

    /// The metadata half of the multipart submission.
    pub fn meta(&self) -> MovieUploadMeta {
        MovieUploadMeta {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            categories: self.categories.clone(),
            view_price: self.view_price,
            download_price: self.download_price,
            currency: self.currency.clone(),
            allow_download: self.allow_download,
        }
    }
}
