// SPDX-License-Identifier: MPL-2.0
//! Image processing port definition.
//!
//! The [`ImageTransformer`] trait is the only way the engine touches pixels:
//! it takes a source image plus rotate/flip/crop instructions and produces a
//! new image, leaving the source untouched.

use super::media::ImageRef;
use crate::domain::crop_region::{CropPlan, CropSpec};
use thiserror::Error;

// =============================================================================
// ProcessingError
// =============================================================================

/// Errors that can occur while rotating, flipping, cropping or encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessingError {
    /// The source image could not be decoded.
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    /// The source format is not supported by the pipeline.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The output would exceed the pipeline's memory limits.
    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    /// The processed image could not be encoded.
    #[error("Failed to encode result: {0}")]
    Encode(String),

    /// Reading the source or writing the result failed.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TransformRequest
// =============================================================================

/// One rotate → flip → crop job on an untouched source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub source: ImageRef,
    /// Clockwise rotation in degrees; `None` skips the rotate stage.
    pub rotate_degrees: Option<u32>,
    pub flip_horizontal: bool,
    /// Crop rectangle in the pixel space of the rotated (and flipped) image.
    pub crop: CropSpec,
}

impl TransformRequest {
    /// Builds the request for `plan`, omitting a zero rotation.
    #[must_use]
    pub fn from_plan(source: ImageRef, plan: &CropPlan) -> Self {
        Self {
            source,
            rotate_degrees: (plan.rotate_degrees != 0).then_some(plan.rotate_degrees),
            flip_horizontal: plan.flip_horizontal,
            crop: plan.crop,
        }
    }
}

// =============================================================================
// ImageTransformer Trait
// =============================================================================

/// Port for the image pipeline.
///
/// Implementations are synchronous; callers move them onto a blocking task.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for use across threads.
pub trait ImageTransformer: Send + Sync {
    /// Applies `request` and returns a reference to the newly written image.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] if any stage fails. The source image must
    /// be left as it was.
    fn process(&self, request: &TransformRequest) -> Result<ImageRef, ProcessingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(rotate_degrees: u32, flip_horizontal: bool) -> CropPlan {
        CropPlan {
            crop: CropSpec {
                origin_x: 1,
                origin_y: 2,
                width: 3,
                height: 4,
            },
            rotate_degrees,
            flip_horizontal,
        }
    }

    #[test]
    fn zero_rotation_is_omitted() {
        let request = TransformRequest::from_plan(ImageRef::new("a.png"), &plan(0, true));
        assert_eq!(request.rotate_degrees, None);
        assert!(request.flip_horizontal);
        assert_eq!(request.crop.width, 3);
    }

    #[test]
    fn non_zero_rotation_is_kept() {
        let request = TransformRequest::from_plan(ImageRef::new("a.png"), &plan(270, false));
        assert_eq!(request.rotate_degrees, Some(270));
        assert!(!request.flip_horizontal);
    }

    #[test]
    fn processing_error_display() {
        let err = ProcessingError::Decode("truncated".to_string());
        assert!(format!("{err}").contains("truncated"));
    }
}
