//! Error types for Postcraft operations.
//!
//! This module defines the main error type [`PostcraftError`]. Note that the
//! extractor itself never fails because nothing matched: an empty page is a
//! valid [`ExtractionResult`](crate::ExtractionResult). The `NoContent` and
//! `InsufficientContent` variants are raised by the [`Converter`](crate::Converter)
//! orchestration layer so front-ends can surface them as messages.
//!
//! # Example
//!
//! ```rust
//! use postcraft_core::{PostcraftError, Result};
//!
//! fn ensure_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(PostcraftError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction, formatting and configuration.
#[derive(Error, Debug)]
pub enum PostcraftError {
    /// HTML parsing errors.
    ///
    /// Returned when a configured CSS selector cannot be parsed.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Nothing could be extracted from the page.
    ///
    /// Every selector and the body fallback produced empty text.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// Extracted text exists but is too short to be worth converting.
    #[error("Extracted content is too short ({length} characters, need at least {minimum})")]
    InsufficientContent { length: usize, minimum: usize },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    SerializeError(String),

    /// Configuration file is malformed or describes an invalid policy.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for PostcraftError {
    fn from(err: serde_json::Error) -> Self {
        PostcraftError::ConfigError(err.to_string())
    }
}

/// Result type alias for PostcraftError.
pub type Result<T> = std::result::Result<T, PostcraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostcraftError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_insufficient_content_error() {
        let err = PostcraftError::InsufficientContent { length: 4, minimum: 10 };
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_json_error_becomes_config_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: PostcraftError = json_err.into();
        assert!(matches!(err, PostcraftError::ConfigError(_)));
    }
}
