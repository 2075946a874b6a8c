// SPDX-License-Identifier: MPL-2.0
//! Source image references and the metadata port.
//!
//! This module defines the [`ImageMetadataProvider`] trait, which reports the
//! native pixel dimensions of a source image without decoding its pixels.

use crate::domain::crop_region::ImageMetadata;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// ImageRef
// =============================================================================

/// Handle to an image the engine reads from or produces.
///
/// The engine never writes through a reference it was given; processing
/// always yields a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// =============================================================================
// MetadataError
// =============================================================================

/// Errors that can occur while probing a source image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// The file was not found.
    #[error("Image not found: {0}")]
    NotFound(String),

    /// The format could not be recognized from the header.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The header reports an empty image.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// The width that was detected.
        width: u32,
        /// The height that was detected.
        height: u32,
    },

    /// The file could not be read (I/O error).
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// ImageMetadataProvider Trait
// =============================================================================

/// Port for reading the native dimensions of a source image.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for use across threads.
pub trait ImageMetadataProvider: Send + Sync {
    /// Returns the unscaled pixel dimensions of `image`.
    ///
    /// # Errors
    ///
    /// Returns a [`MetadataError`] if the image cannot be found, read or
    /// recognized, or if it reports a zero dimension.
    fn dimensions(&self, image: &ImageRef) -> Result<ImageMetadata, MetadataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_error_display() {
        let err = MetadataError::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(format!("{err}").contains("0x100"));

        let err = MetadataError::NotFound("/tmp/missing.jpg".to_string());
        assert!(format!("{err}").contains("missing.jpg"));
    }

    #[test]
    fn image_ref_displays_its_path() {
        let image = ImageRef::new("/photos/me.png");
        assert_eq!(image.to_string(), "/photos/me.png");
        assert_eq!(image.path(), Path::new("/photos/me.png"));
    }
}
