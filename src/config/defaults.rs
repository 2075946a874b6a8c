// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Viewport**: Crop window and fitted image size
//! - **Gesture**: Scale range, snapping and pinch guard
//! - **Output**: Commit-time rotation tolerance and encoding

// ==========================================================================
// Viewport Defaults
// ==========================================================================

/// Default side length of the square crop window, in logical pixels.
pub const DEFAULT_CROP_SIZE: f64 = 352.0;

/// Smallest accepted crop window side length.
pub const MIN_CROP_SIZE: f64 = 16.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Default lower scale bound while pinching.
pub const DEFAULT_MIN_SCALE: f64 = crate::gesture::scale_bounds::MIN;

/// Default upper scale bound while pinching.
pub const DEFAULT_MAX_SCALE: f64 = crate::gesture::scale_bounds::MAX;

/// Default "magnetic" snap threshold during a rotation, in degrees.
pub const DEFAULT_GESTURE_SNAP_DEGREES: f64 = crate::domain::snap::snap_bounds::GESTURE_THRESHOLD;

/// Default snap threshold applied on release, in degrees.
pub const DEFAULT_RELEASE_SNAP_DEGREES: f64 = crate::domain::snap::snap_bounds::RELEASE_THRESHOLD;

/// Default minimum finger distance for starting a pinch, in logical pixels.
pub const DEFAULT_PINCH_EPSILON: f64 = crate::gesture::DEFAULT_PINCH_EPSILON;

/// Smallest accepted pinch start distance; zero would divide by zero.
pub const MIN_PINCH_EPSILON: f64 = 1e-6;

// ==========================================================================
// Output Defaults
// ==========================================================================

/// Default rotation (degrees) ignored at commit time.
pub const DEFAULT_MICRO_ROTATION_DEGREES: f64 =
    crate::domain::crop_region::DEFAULT_MICRO_ROTATION_THRESHOLD;

/// Default JPEG quality of the cropped image.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Minimum JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;
