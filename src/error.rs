// SPDX-License-Identifier: MPL-2.0
//! Errors that cross the engine boundary.
//!
//! Geometry and gesture handling never fail; only session setup, commit and
//! configuration I/O produce these.

use crate::application::port::{MetadataError, ProcessingError};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Native dimensions of the source could not be determined; the crop
    /// cannot be computed, so the session never opens.
    #[error("Image metadata unavailable: {0}")]
    ImageMetadataUnavailable(#[from] MetadataError),

    /// The image pipeline failed. Retryable: the session transform is untouched.
    #[error("Crop failed: {0}")]
    ProcessingFailed(#[from] ProcessingError),

    /// A commit is already pending for this session.
    #[error("A crop is already in progress")]
    CommitInProgress,

    /// The session was dismissed or has already produced its image.
    #[error("Crop session is closed")]
    SessionClosed,

    #[error("Config Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl Error {
    /// Returns whether pressing commit again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ProcessingFailed(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn processing_failures_are_retryable() {
        let err: Error = ProcessingError::Encode("disk full".to_string()).into();
        assert!(err.is_retryable());
        assert!(format!("{err}").starts_with("Crop failed"));
    }

    #[test]
    fn metadata_failures_are_fatal() {
        let err: Error = MetadataError::NotFound("x.jpg".to_string()).into();
        assert!(matches!(err, Error::ImageMetadataUnavailable(_)));
        assert!(!err.is_retryable());
        assert!(!Error::CommitInProgress.is_retryable());
    }
}
