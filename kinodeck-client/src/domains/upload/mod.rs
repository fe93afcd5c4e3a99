//! Filmmaker upload domain: the submission form, its validation, and
//! the multipart submit.

pub mod form;
pub mod messages;
pub mod update;

pub use form::{FieldError, UploadForm};
pub use messages::Message;
pub use update::update;

#[derive(Debug, Default)]
pub struct UploadState {
    pub form: UploadForm,
    /// One entry per failing field, refreshed on every submit attempt.
    pub field_errors: Vec<FieldError>,
    pub submitting: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl UploadState {
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}
