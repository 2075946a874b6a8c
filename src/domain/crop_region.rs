// SPDX-License-Identifier: MPL-2.0
//! Conversion of the on-screen transform into a source-pixel crop.
//!
//! The on-screen view shows the source image fit to `fitted_width`, then
//! scaled, translated and rotated. The resulting crop is expressed in the
//! pixel space of the *rotated* source, because the image pipeline applies
//! rotate, then flip, then crop to the untouched original.

use crate::domain::geometry::rotated_bounds;
use crate::domain::transform::TransformState;

/// Default rotation (degrees) below which a commit is treated as unrotated.
pub const DEFAULT_MICRO_ROTATION_THRESHOLD: f64 = 3.0;

/// Absorbs float noise before flooring/ceiling pixel coordinates.
const PIXEL_TOLERANCE: f64 = 1e-9;

/// Native pixel dimensions of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub native_width: u32,
    pub native_height: u32,
}

/// A crop rectangle in rotated-source pixel space. Width and height are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Everything the image pipeline needs, applied in the order rotate, flip, crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    pub crop: CropSpec,
    /// Clockwise rotation in whole degrees, in `[0, 360)`.
    pub rotate_degrees: u32,
    pub flip_horizontal: bool,
}

/// Normalizes a rotation to whole degrees in `[0, 360)`.
///
/// Rotations within `micro_threshold` of 0 (from either side) become 0, so
/// 359° counts as a 1° tilt and is dropped just like 1°. Only the distance to
/// the nearest full turn matters, not the sign or the winding.
#[must_use]
pub fn normalize_rotation(degrees: f64, micro_threshold: f64) -> u32 {
    let normalized = degrees.rem_euclid(360.0);
    let from_zero = normalized.min(360.0 - normalized);
    if from_zero < micro_threshold {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = normalized.round() as u32;
    rounded % 360
}

/// Maps a committed [`TransformState`] onto the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegionCalculator {
    crop_size: f64,
    fitted_width: f64,
    micro_rotation_threshold: f64,
}

impl CropRegionCalculator {
    #[must_use]
    pub fn new(crop_size: f64, fitted_width: f64) -> Self {
        Self {
            crop_size,
            fitted_width,
            micro_rotation_threshold: DEFAULT_MICRO_ROTATION_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_micro_rotation_threshold(mut self, threshold: f64) -> Self {
        self.micro_rotation_threshold = threshold.max(0.0);
        self
    }

    #[must_use]
    pub fn compute(&self, state: &TransformState, metadata: ImageMetadata) -> CropPlan {
        let rotate_degrees = normalize_rotation(state.rotation_degrees, self.micro_rotation_threshold);
        let native_width = f64::from(metadata.native_width.max(1));
        let native_height = f64::from(metadata.native_height.max(1));
        let (rotated_width, rotated_height) =
            rotated_bounds(native_width, native_height, f64::from(rotate_degrees));

        let fit_scale = self.fitted_width / native_width;
        let total_scale = fit_scale * state.scale;

        let crop_extent = self.crop_size / total_scale;
        // Moving the image right moves the window left over the image.
        let center_x = rotated_width / 2.0 - state.translate_x / total_scale;
        let center_y = rotated_height / 2.0 - state.translate_y / total_scale;

        let origin_x = origin(center_x - crop_extent / 2.0, rotated_width);
        let origin_y = origin(center_y - crop_extent / 2.0, rotated_height);
        let width = extent(crop_extent, rotated_width - origin_x);
        let height = extent(crop_extent, rotated_height - origin_y);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let crop = CropSpec {
            origin_x: origin_x as u32,
            origin_y: origin_y as u32,
            width,
            height,
        };
        CropPlan {
            crop,
            rotate_degrees,
            flip_horizontal: state.flip_horizontal,
        }
    }
}

/// Floors towards the image and keeps at least one pixel inside it.
fn origin(raw: f64, limit: f64) -> f64 {
    let last = ((limit - PIXEL_TOLERANCE).ceil() - 1.0).max(0.0);
    (raw + PIXEL_TOLERANCE).floor().clamp(0.0, last)
}

fn extent(wanted: f64, available: f64) -> u32 {
    let size = (wanted.min(available) - PIXEL_TOLERANCE).ceil().max(1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = size.min(f64::from(u32::MAX)) as u32;
    size
}
