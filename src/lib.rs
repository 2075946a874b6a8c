// SPDX-License-Identifier: MPL-2.0
//! `photo_cropper` is a touch-driven crop engine for square photo crops.
//!
//! It interprets one- and two-finger gestures into a pan/zoom/rotate view
//! transform, keeps the crop window covered by the image, and turns the final
//! view into a rotate → flip → crop job on the untouched source image.
//!
//! # Layers
//!
//! - [`domain`]: Pure geometry, snapping, clamping and crop computation
//! - [`gesture`]: The touch-interpretation state machine
//! - [`application`]: Ports, the crop orchestrator and the crop session
//! - [`infrastructure`]: Adapters over the `image` crate
//! - [`config`]: TOML settings
//! - [`replay`]: Recorded touch scripts

#![doc(html_root_url = "https://docs.rs/photo_cropper/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod infrastructure;
pub mod replay;

pub use error::{Error, Result};
