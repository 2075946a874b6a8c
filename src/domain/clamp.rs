// SPDX-License-Identifier: MPL-2.0
//! Translation limits that keep the crop window covered by image content.

use crate::domain::crop_region::ImageMetadata;
use crate::domain::geometry::{rotated_bounds, Size, Vector};

/// How the on-screen image extent is measured when clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Use the unrotated fitted size, whatever the current rotation.
    #[default]
    AxisAligned,
    /// Use the bounding box of the fitted image at the current rotation.
    RotationAware,
}

/// Limits panning so the fixed, square crop window stays inside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampPolicy {
    crop_size: f64,
    fitted: Size,
    mode: ClampMode,
}

/// Size of the source image on screen at scale 1, fit to `fitted_width`.
#[must_use]
pub fn fitted_size(fitted_width: f64, metadata: ImageMetadata) -> Size {
    let ratio = fitted_width / f64::from(metadata.native_width.max(1));
    Size::new(fitted_width, f64::from(metadata.native_height) * ratio)
}

impl ClampPolicy {
    #[must_use]
    pub fn new(crop_size: f64, fitted: Size, mode: ClampMode) -> Self {
        Self {
            crop_size,
            fitted,
            mode,
        }
    }

    #[must_use]
    pub fn crop_size(&self) -> f64 {
        self.crop_size
    }

    #[must_use]
    pub fn fitted(&self) -> Size {
        self.fitted
    }

    #[must_use]
    pub fn mode(&self) -> ClampMode {
        self.mode
    }

    fn extent(&self, scale: f64, rotation_degrees: f64) -> Size {
        match self.mode {
            ClampMode::AxisAligned => self.fitted.scaled(scale),
            ClampMode::RotationAware => {
                let (width, height) =
                    rotated_bounds(self.fitted.width, self.fitted.height, rotation_degrees);
                Size::new(width, height).scaled(scale)
            }
        }
    }

    /// Largest absolute translation allowed on each axis.
    ///
    /// An axis where the image is narrower than the crop window gets 0,
    /// which keeps the image centered on that axis.
    #[must_use]
    pub fn max_translation(&self, scale: f64, rotation_degrees: f64) -> Vector {
        let extent = self.extent(scale, rotation_degrees);
        let max_tx = if extent.width > self.crop_size {
            (extent.width - self.crop_size) / 2.0
        } else {
            0.0
        };
        let max_ty = if extent.height > self.crop_size {
            (extent.height - self.crop_size) / 2.0
        } else {
            0.0
        };
        Vector::new(max_tx, max_ty)
    }

    #[must_use]
    pub fn clamp(&self, translation: Vector, scale: f64, rotation_degrees: f64) -> Vector {
        let max = self.max_translation(scale, rotation_degrees);
        Vector::new(
            translation.dx.clamp(-max.dx, max.dx),
            translation.dy.clamp(-max.dy, max.dy),
        )
    }

    /// Smallest scale at which the fitted image covers the window on both axes.
    #[must_use]
    pub fn min_cover_scale(&self) -> f64 {
        let by_width = self.crop_size / self.fitted.width;
        let by_height = self.crop_size / self.fitted.height;
        by_width.max(by_height)
    }

    /// Scale the view settles to when it was zoomed out too far; never below 1.
    #[must_use]
    pub fn cover_scale(&self) -> f64 {
        self.min_cover_scale().max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const CROP: f64 = 300.0;

    fn square_policy() -> ClampPolicy {
        ClampPolicy::new(CROP, Size::new(CROP, CROP), ClampMode::AxisAligned)
    }

    #[test]
    fn identity_scale_on_square_image_pins_translation() {
        let policy = square_policy();
        assert_eq!(policy.max_translation(1.0, 0.0), Vector::ZERO);
        assert_eq!(
            policy.clamp(Vector::new(40.0, -25.0), 1.0, 0.0),
            Vector::ZERO
        );
    }

    #[test]
    fn zoomed_image_allows_half_the_overflow() {
        let policy = square_policy();
        let max = policy.max_translation(2.0, 0.0);
        assert_abs_diff_eq!(max.dx, 150.0);
        assert_abs_diff_eq!(max.dy, 150.0);

        let clamped = policy.clamp(Vector::new(400.0, -90.0), 2.0, 0.0);
        assert_eq!(clamped, Vector::new(150.0, -90.0));
    }

    #[test]
    fn under_filled_axis_is_centered() {
        let policy = square_policy();
        let clamped = policy.clamp(Vector::new(12.0, 7.0), 0.6, 0.0);
        assert_eq!(clamped, Vector::ZERO);
    }

    #[test]
    fn clamp_is_idempotent() {
        let policy = ClampPolicy::new(CROP, Size::new(CROP, 450.0), ClampMode::AxisAligned);
        for &(tx, ty, scale) in &[
            (500.0, -500.0, 1.0),
            (-13.0, 88.0, 1.7),
            (1e6, 1e6, 4.9),
            (3.0, 2.0, 0.5),
        ] {
            let once = policy.clamp(Vector::new(tx, ty), scale, 0.0);
            let twice = policy.clamp(once, scale, 0.0);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn clamp_respects_bound_for_covering_scales() {
        let fitted = Size::new(CROP, 420.0);
        let policy = ClampPolicy::new(CROP, fitted, ClampMode::AxisAligned);
        let mut scale = CROP / fitted.width;
        while scale <= 5.0 {
            let clamped = policy.clamp(Vector::new(1e4, -1e4), scale, 0.0);
            assert!(clamped.dx.abs() <= (fitted.width * scale - CROP) / 2.0 + 1e-9);
            assert!(clamped.dy.abs() <= (fitted.height * scale - CROP) / 2.0 + 1e-9);
            scale += 0.25;
        }
    }

    #[test]
    fn axis_aligned_mode_ignores_rotation() {
        let policy = square_policy();
        assert_eq!(
            policy.max_translation(2.0, 45.0),
            policy.max_translation(2.0, 0.0)
        );
    }

    #[test]
    fn rotation_aware_mode_uses_rotated_extent() {
        let policy = ClampPolicy::new(CROP, Size::new(CROP, CROP), ClampMode::RotationAware);
        let max = policy.max_translation(1.0, 45.0);
        let diagonal = CROP * 2f64.sqrt();
        assert_abs_diff_eq!(max.dx, (diagonal - CROP) / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.dy, (diagonal - CROP) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn fitted_size_keeps_aspect_ratio() {
        let fitted = fitted_size(
            300.0,
            ImageMetadata {
                native_width: 1000,
                native_height: 500,
            },
        );
        assert_eq!(fitted, Size::new(300.0, 150.0));
    }

    #[test]
    fn cover_scale_grows_for_landscape_sources() {
        let landscape = ClampPolicy::new(CROP, Size::new(CROP, 150.0), ClampMode::AxisAligned);
        assert_abs_diff_eq!(landscape.cover_scale(), 2.0);

        let portrait = ClampPolicy::new(CROP, Size::new(CROP, 600.0), ClampMode::AxisAligned);
        assert_abs_diff_eq!(portrait.min_cover_scale(), 1.0);
        assert_abs_diff_eq!(portrait.cover_scale(), 1.0);
    }
}
