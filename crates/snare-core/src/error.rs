//! Error types for snare-core

use http::StatusCode;
use thiserror::Error;

/// Result type alias for snare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal parse errors
///
/// "Not HTTP" and "need more bytes" are ordinary outcomes, see
/// [`ParseOutcome`](crate::ParseOutcome). These variants are raised only when
/// the input is unambiguously HTTP-shaped but cannot be served.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grammatically valid method token the server does not implement
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Header block exceeds the configured limit
    #[error("Header too large: {size} bytes exceeds limit of {limit} bytes")]
    HeaderTooLarge { size: usize, limit: usize },

    /// Rebuilt absolute URL is longer than a URI can hold
    #[error("URI too long: {size} bytes exceeds limit of {limit} bytes")]
    UriTooLong { size: usize, limit: usize },

    /// Host header that would alter the path, query or fragment
    #[error("Invalid Host header: {0}")]
    InvalidHost(String),

    /// Declared body exceeds the configured limit
    #[error("Body too large: {size} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },
}

impl Error {
    /// Status a server should answer with before closing the connection
    pub fn status(&self) -> StatusCode {
        match self {
            Error::UnsupportedMethod(_) => StatusCode::NOT_IMPLEMENTED,
            Error::HeaderTooLarge { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            Error::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::UriTooLong { .. } => StatusCode::URI_TOO_LONG,
            Error::InvalidHost(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::UnsupportedMethod("PATCH".into()).status().as_u16(), 501);
        assert_eq!(Error::HeaderTooLarge { size: 10, limit: 5 }.status().as_u16(), 431);
        assert_eq!(Error::BodyTooLarge { size: 10, limit: 5 }.status().as_u16(), 413);
        assert_eq!(Error::UriTooLong { size: 10, limit: 5 }.status().as_u16(), 414);
        assert_eq!(Error::InvalidHost("a/b".into()).status().as_u16(), 400);
    }

    #[test]
    fn test_display() {
        let err = Error::BodyTooLarge { size: 2048, limit: 1024 };
        assert_eq!(
            err.to_string(),
            "Body too large: 2048 bytes exceeds limit of 1024 bytes"
        );
        assert_eq!(
            Error::UnsupportedMethod("PATCH".into()).to_string(),
            "Unsupported HTTP method: PATCH"
        );
    }
}
