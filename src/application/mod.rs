// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`orchestrator`]: Runs a crop plan through the image pipeline
//! - [`session`]: One crop interaction, from open to commit
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives [`session::CropSession`]
//!
//! # Example
//!
//! ```ignore
//! use photo_cropper::application::{CropOrchestrator, CropSession};
//! use photo_cropper::infrastructure::image_rs::{ImageRsMetadataProvider, ImageRsTransformer};
//!
//! let mut session = CropSession::open(source, &ImageRsMetadataProvider, &config)?;
//! let orchestrator = CropOrchestrator::new(Arc::new(ImageRsTransformer::new(out_dir, 80)));
//! let cropped = session.commit(&orchestrator).await?;
//! ```

pub mod orchestrator;
pub mod port;
pub mod session;

pub use orchestrator::CropOrchestrator;
pub use session::{CommitOutcome, CommitTicket, CropSession};
