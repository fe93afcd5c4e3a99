//! Client-side error taxonomy.
//!
//! Every failure is recoverable: errors surface as notices or field
//! errors and the triggering state stays retryable. Variants are kept
//! `Clone + PartialEq` so messages can carry `Result`s and tests can
//! assert on them directly.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure: DNS, connect, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response whose body carried no usable message.
    #[error("request failed with status {0}")]
    Status(u16),

    /// Non-2xx response with a server-supplied message.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response whose payload did not decode.
    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// A local file could not be read while building a multipart body.
    #[error("file error: {0}")]
    File(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<kinodeck_model::DecodeError> for ApiError {
    fn from(err: kinodeck_model::DecodeError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl ApiError {
    /// The message to show an operator: the server-supplied one when the
    /// server sent one, otherwise the caller's per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Server { status: 422, message: "Email already subscribed".into() };
        assert_eq!(err.user_message("Could not subscribe"), "Email already subscribed");
    }

    #[test]
    fn fallback_applies_without_a_server_message() {
        assert_eq!(
            ApiError::Status(502).user_message("Could not subscribe"),
            "Could not subscribe"
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message("Could not subscribe"),
            "Could not subscribe"
        );
        let blank = ApiError::Server { status: 500, message: "  ".into() };
        assert_eq!(blank.user_message("Could not subscribe"), "Could not subscribe");
    }

    #[test]
    fn unauthorized_detection_covers_both_shapes() {
        assert!(ApiError::Status(401).is_unauthorized());
        assert!(ApiError::Server { status: 401, message: "expired".into() }.is_unauthorized());
        assert!(!ApiError::Status(403).is_unauthorized());
    }
}
