// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Crop geometry with ZERO external dependencies.
//!
//! This module contains pure value types and rules. It depends on nothing
//! but `std`, so every rule here can be tested without an image or a screen.
//!
//! # Modules
//!
//! - [`geometry`]: Points, distances, angles and rotated bounding boxes
//! - [`snap`]: Rotation snapping ([`RotationSnap`](snap::RotationSnap))
//! - [`clamp`]: Pan limits ([`ClampPolicy`](clamp::ClampPolicy))
//! - [`touch`]: Touch frames and id-keyed tracking
//! - [`transform`]: The view transform ([`TransformState`](transform::TransformState),
//!   [`LiveTransform`](transform::LiveTransform))
//! - [`crop_region`]: Source-pixel crop computation
//!   ([`CropRegionCalculator`](crop_region::CropRegionCalculator))

pub mod clamp;
pub mod crop_region;
pub mod geometry;
pub mod snap;
pub mod touch;
pub mod transform;
