// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces to the engine's two collaborators.
//! The traits use only domain types, so the crop logic stays independent of
//! how images are decoded, processed or stored.
//!
//! # Available Ports
//!
//! - [`media`]: Source image references and dimension probing
//! - [`processing`]: The rotate → flip → crop pipeline
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `image` crate types)
//! - Traits are `Send + Sync` so they can be moved onto blocking tasks
//! - Methods return `Result` with port-specific error types
//! - No `async fn`: callers decide where the blocking work runs
//!
//! # Example
//!
//! ```ignore
//! use photo_cropper::application::port::{ImageMetadataProvider, ImageRef};
//!
//! fn native_width(provider: &impl ImageMetadataProvider, image: &ImageRef) -> Option<u32> {
//!     provider.dimensions(image).ok().map(|meta| meta.native_width)
//! }
//! ```

pub mod media;
pub mod processing;

// Re-export main types for convenience
pub use media::{ImageMetadataProvider, ImageRef, MetadataError};
pub use processing::{ImageTransformer, ProcessingError, TransformRequest};
