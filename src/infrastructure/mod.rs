// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`image_rs`]: Dimension probing and the rotate/flip/crop pipeline via the
//!   `image` crate (implements [`ImageMetadataProvider`] and [`ImageTransformer`])
//!
//! [`ImageMetadataProvider`]: crate::application::port::ImageMetadataProvider
//! [`ImageTransformer`]: crate::application::port::ImageTransformer

pub mod image_rs;

// Re-export main types for convenience
pub use image_rs::{ImageRsMetadataProvider, ImageRsTransformer};
