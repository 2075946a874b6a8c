// SPDX-License-Identifier: MPL-2.0
//! Runs a computed crop plan through the image pipeline.

use crate::application::port::{ImageRef, ImageTransformer, ProcessingError, TransformRequest};
use crate::domain::crop_region::CropPlan;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Sequences rotate → flip → crop on the source image via an [`ImageTransformer`].
#[derive(Clone)]
pub struct CropOrchestrator {
    transformer: Arc<dyn ImageTransformer>,
}

impl CropOrchestrator {
    pub fn new(transformer: Arc<dyn ImageTransformer>) -> Self {
        Self { transformer }
    }

    /// The pipeline request for `plan`; rotation is requested only when non-zero.
    #[must_use]
    pub fn request_for(source: &ImageRef, plan: &CropPlan) -> TransformRequest {
        TransformRequest::from_plan(source.clone(), plan)
    }

    /// Processes the source on a blocking task and returns the new image.
    ///
    /// # Errors
    ///
    /// Any pipeline failure, including a panicked or cancelled worker, is
    /// reported as [`Error::ProcessingFailed`]. The source is never modified.
    pub async fn run(&self, source: &ImageRef, plan: CropPlan) -> Result<ImageRef> {
        let request = Self::request_for(source, &plan);
        log::debug!(
            "cropping {} (rotate {:?}, flip {}, crop {:?})",
            request.source,
            request.rotate_degrees,
            request.flip_horizontal,
            request.crop
        );

        let transformer = Arc::clone(&self.transformer);
        let outcome = tokio::task::spawn_blocking(move || transformer.process(&request))
            .await
            .map_err(|e| ProcessingError::Io(format!("crop worker failed: {e}")))?;

        match outcome {
            Ok(output) => {
                log::debug!("crop written to {output}");
                Ok(output)
            }
            Err(err) => {
                log::warn!("crop of {source} failed: {err}");
                Err(Error::ProcessingFailed(err))
            }
        }
    }
}

impl fmt::Debug for CropOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropOrchestrator").finish_non_exhaustive()
    }
}
