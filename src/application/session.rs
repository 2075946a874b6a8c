// SPDX-License-Identifier: MPL-2.0
//! One crop interaction, from opening an image to producing the cropped copy.
//!
//! [`CropSession`] owns the live transform and the gesture interpreter, and
//! guards the commit so that at most one crop is in flight. A commit is split
//! in two halves so callers that cannot hold the session across an `.await`
//! (a UI event loop, typically) can run the orchestrator themselves:
//!
//! ```ignore
//! let ticket = session.begin_commit()?;
//! // ... later, when the orchestrator finishes:
//! match session.finish_commit(ticket, result) {
//!     CommitOutcome::Completed(image) => show(image),
//!     CommitOutcome::Failed(err) => offer_retry(err),
//!     CommitOutcome::Discarded => {}
//! }
//! ```

use crate::application::orchestrator::CropOrchestrator;
use crate::application::port::{ImageMetadataProvider, ImageRef, MetadataError};
use crate::config::CropConfig;
use crate::domain::clamp::{fitted_size, ClampPolicy};
use crate::domain::crop_region::{CropPlan, CropRegionCalculator, ImageMetadata};
use crate::domain::touch::TouchEvent;
use crate::domain::transform::{LiveTransform, SubscriptionId, TransformState, Transition};
use crate::error::{Error, Result};
use crate::gesture::{settle, GesturePhase, GestureSession};

/// Proof that a commit was started; hand it back to [`CropSession::finish_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTicket {
    id: u64,
    plan: CropPlan,
}

impl CommitTicket {
    /// The crop this commit asked for.
    #[must_use]
    pub fn plan(&self) -> CropPlan {
        self.plan
    }
}

/// What became of a finished commit.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The crop was written; the session is now closed.
    Completed(ImageRef),
    /// The pipeline failed; the transform is unchanged and commit is enabled again.
    Failed(Error),
    /// The session was dismissed (or the ticket is stale); the result was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommitState {
    Ready,
    Pending(u64),
    Closed,
}

/// State of an open crop modal, without the chrome.
#[derive(Debug)]
pub struct CropSession {
    source: ImageRef,
    metadata: ImageMetadata,
    gesture: GestureSession,
    live: LiveTransform,
    calculator: CropRegionCalculator,
    commit: CommitState,
    next_ticket: u64,
}

impl CropSession {
    /// Probes `source` and opens a session on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageMetadataUnavailable`] when the native dimensions
    /// cannot be read or are empty.
    pub fn open(
        source: ImageRef,
        provider: &dyn ImageMetadataProvider,
        config: &CropConfig,
    ) -> Result<Self> {
        let metadata = provider.dimensions(&source).map_err(|err| {
            log::warn!("cannot open crop session on {source}: {err}");
            Error::ImageMetadataUnavailable(err)
        })?;
        Self::with_metadata(source, metadata, config)
    }

    /// Opens a session on an image whose dimensions are already known.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageMetadataUnavailable`] for a zero-sized image.
    pub fn with_metadata(
        source: ImageRef,
        metadata: ImageMetadata,
        config: &CropConfig,
    ) -> Result<Self> {
        if metadata.native_width == 0 || metadata.native_height == 0 {
            return Err(Error::ImageMetadataUnavailable(
                MetadataError::InvalidDimensions {
                    width: metadata.native_width,
                    height: metadata.native_height,
                },
            ));
        }

        let crop_size = config.crop_size();
        let fitted_width = config.fitted_width();
        let clamp = ClampPolicy::new(
            crop_size,
            fitted_size(fitted_width, metadata),
            config.clamp_mode(),
        );
        let initial = TransformState {
            scale: clamp.cover_scale(),
            ..TransformState::identity()
        };
        let calculator = CropRegionCalculator::new(crop_size, fitted_width)
            .with_micro_rotation_threshold(config.micro_rotation_degrees());

        log::debug!(
            "crop session opened on {source} ({}x{}, initial scale {:.3})",
            metadata.native_width,
            metadata.native_height,
            initial.scale
        );

        Ok(Self {
            source,
            metadata,
            gesture: GestureSession::new(config.gesture_config(), clamp),
            live: LiveTransform::new(initial),
            calculator,
            commit: CommitState::Ready,
            next_ticket: 0,
        })
    }

    #[must_use]
    pub fn source(&self) -> &ImageRef {
        &self.source
    }

    #[must_use]
    pub fn metadata(&self) -> ImageMetadata {
        self.metadata
    }

    /// Current view transform.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.live.current()
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commit == CommitState::Closed
    }

    #[must_use]
    pub fn is_commit_pending(&self) -> bool {
        matches!(self.commit, CommitState::Pending(_))
    }

    /// Whether the commit action should be enabled.
    #[must_use]
    pub fn can_commit(&self) -> bool {
        self.commit == CommitState::Ready
    }

    /// Registers a renderer for transform updates.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TransformState, Transition) + Send + 'static,
    {
        self.live.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.live.unsubscribe(id)
    }

    /// Feeds one touch event to the gesture interpreter.
    ///
    /// Gestures stay live while a commit is pending; a closed session ignores them.
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        if self.is_closed() {
            log::trace!("touch ignored: crop session closed");
            return;
        }
        self.gesture.handle(event, &mut self.live);
    }

    /// Mirrors the image horizontally.
    pub fn toggle_flip(&mut self) {
        if self.is_closed() {
            return;
        }
        let current = self.live.current();
        self.live.apply(
            TransformState {
                flip_horizontal: !current.flip_horizontal,
                ..current
            },
            Transition::Immediate,
        );
    }

    /// Returns to the opening view: centered, unrotated, unflipped, at cover scale.
    pub fn reset(&mut self) {
        if self.is_closed() {
            return;
        }
        self.gesture.cancel();
        let initial = TransformState {
            scale: self.gesture.clamp_policy().cover_scale(),
            ..TransformState::identity()
        };
        self.live.apply(initial, Transition::Animated);
    }

    /// The crop the current view would produce, settled as on release.
    #[must_use]
    pub fn preview_plan(&self) -> CropPlan {
        let settled = settle(
            self.live.current(),
            self.gesture.clamp_policy(),
            self.gesture.config().snap,
        );
        self.calculator.compute(&settled, self.metadata)
    }

    /// Starts a commit and disables further commits until it finishes.
    ///
    /// The live transform is not modified.
    ///
    /// # Errors
    ///
    /// [`Error::CommitInProgress`] while another commit is pending,
    /// [`Error::SessionClosed`] after a dismissal or a completed crop.
    pub fn begin_commit(&mut self) -> Result<CommitTicket> {
        match self.commit {
            CommitState::Pending(_) => return Err(Error::CommitInProgress),
            CommitState::Closed => return Err(Error::SessionClosed),
            CommitState::Ready => {}
        }

        let plan = self.preview_plan();
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.commit = CommitState::Pending(id);
        log::debug!("commit {id} started on {}: {plan:?}", self.source);
        Ok(CommitTicket { id, plan })
    }

    /// Accepts the orchestrator's result for `ticket`.
    pub fn finish_commit(&mut self, ticket: CommitTicket, result: Result<ImageRef>) -> CommitOutcome {
        if self.commit != CommitState::Pending(ticket.id) {
            log::debug!("commit {} result discarded", ticket.id);
            return CommitOutcome::Discarded;
        }
        match result {
            Ok(image) => {
                self.commit = CommitState::Closed;
                self.gesture.cancel();
                log::debug!("commit {} completed: {image}", ticket.id);
                CommitOutcome::Completed(image)
            }
            Err(err) => {
                self.commit = CommitState::Ready;
                log::warn!("commit {} failed: {err}", ticket.id);
                CommitOutcome::Failed(err)
            }
        }
    }

    /// Closes the session. A pending commit's result will be discarded.
    pub fn dismiss(&mut self) {
        if self.is_commit_pending() {
            log::debug!("crop session dismissed with a commit pending");
        }
        self.commit = CommitState::Closed;
        self.gesture.cancel();
    }

    /// Runs a whole commit through `orchestrator`.
    ///
    /// # Errors
    ///
    /// Anything [`begin_commit`](Self::begin_commit) rejects, or
    /// [`Error::ProcessingFailed`] from the pipeline.
    pub async fn commit(&mut self, orchestrator: &CropOrchestrator) -> Result<ImageRef> {
        let ticket = self.begin_commit()?;
        let result = orchestrator.run(&self.source, ticket.plan).await;
        match self.finish_commit(ticket, result) {
            CommitOutcome::Completed(image) => Ok(image),
            CommitOutcome::Failed(err) => Err(err),
            CommitOutcome::Discarded => Err(Error::SessionClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{ImageTransformer, ProcessingError, TransformRequest};
    use crate::config::ViewportConfig;
    use crate::domain::crop_region::CropSpec;
    use crate::domain::touch::{TouchFrame, TouchPoint};
    use approx::assert_abs_diff_eq;
    use std::sync::{Arc, Mutex};

    struct FixedDimensions(std::result::Result<ImageMetadata, MetadataError>);

    impl ImageMetadataProvider for FixedDimensions {
        fn dimensions(&self, _image: &ImageRef) -> std::result::Result<ImageMetadata, MetadataError> {
            self.0.clone()
        }
    }

    struct FlakyTransformer {
        failures_left: Mutex<u32>,
    }

    impl ImageTransformer for FlakyTransformer {
        fn process(&self, _request: &TransformRequest) -> std::result::Result<ImageRef, ProcessingError> {
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                Err(ProcessingError::Decode("corrupt".to_string()))
            } else {
                Ok(ImageRef::new("cropped.jpg"))
            }
        }
    }

    fn config(crop_size: f64, fitted_width: f64) -> CropConfig {
        CropConfig {
            viewport: ViewportConfig {
                crop_size: Some(crop_size),
                fitted_width: Some(fitted_width),
            },
            ..CropConfig::default()
        }
    }

    fn square_session() -> CropSession {
        CropSession::with_metadata(
            ImageRef::new("photo.png"),
            ImageMetadata {
                native_width: 1000,
                native_height: 1000,
            },
            &config(300.0, 1000.0),
        )
        .expect("session opens")
    }

    fn frame(points: &[(u64, f64, f64)]) -> TouchFrame {
        TouchFrame::new(
            points
                .iter()
                .map(|&(id, x, y)| TouchPoint::new(id, x, y))
                .collect(),
        )
    }

    fn flaky(failures: u32) -> CropOrchestrator {
        CropOrchestrator::new(Arc::new(FlakyTransformer {
            failures_left: Mutex::new(failures),
        }))
    }

    #[test]
    fn open_maps_metadata_failure() {
        let provider = FixedDimensions(Err(MetadataError::NotFound("gone.png".to_string())));
        let err = CropSession::open(ImageRef::new("gone.png"), &provider, &CropConfig::default())
            .expect_err("metadata missing");
        assert!(matches!(
            err,
            Error::ImageMetadataUnavailable(MetadataError::NotFound(_))
        ));
    }

    #[test]
    fn open_rejects_empty_images() {
        let provider = FixedDimensions(Ok(ImageMetadata {
            native_width: 0,
            native_height: 40,
        }));
        let err = CropSession::open(ImageRef::new("empty.png"), &provider, &CropConfig::default())
            .expect_err("empty image");
        assert!(matches!(err, Error::ImageMetadataUnavailable(_)));
    }

    #[test]
    fn landscape_sources_open_at_cover_scale() {
        let session = CropSession::with_metadata(
            ImageRef::new("wide.png"),
            ImageMetadata {
                native_width: 2000,
                native_height: 1000,
            },
            &config(300.0, 300.0),
        )
        .unwrap();
        assert_abs_diff_eq!(session.transform().scale, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn portrait_sources_open_at_identity() {
        let session = CropSession::with_metadata(
            ImageRef::new("tall.png"),
            ImageMetadata {
                native_width: 1000,
                native_height: 2000,
            },
            &config(300.0, 300.0),
        )
        .unwrap();
        assert_eq!(session.transform(), TransformState::identity());
    }

    #[test]
    fn untouched_session_commits_centered_window() {
        let mut session = square_session();
        let ticket = session.begin_commit().unwrap();
        assert_eq!(
            ticket.plan().crop,
            CropSpec {
                origin_x: 350,
                origin_y: 350,
                width: 300,
                height: 300,
            }
        );
        assert_eq!(ticket.plan().rotate_degrees, 0);
    }

    #[test]
    fn second_commit_while_pending_is_rejected() {
        let mut session = square_session();
        let _ticket = session.begin_commit().unwrap();
        assert!(!session.can_commit());
        assert_eq!(session.begin_commit(), Err(Error::CommitInProgress));
    }

    #[test]
    fn failed_commit_is_retryable_and_keeps_transform() {
        let mut session = square_session();
        session.handle_touch(&TouchEvent::Grant(frame(&[(1, 100.0, 100.0)])));
        session.handle_touch(&TouchEvent::Move(frame(&[(1, 130.0, 90.0)])));
        session.handle_touch(&TouchEvent::Release(TouchFrame::empty()));
        let before = session.transform();

        let ticket = session.begin_commit().unwrap();
        let outcome = session.finish_commit(
            ticket,
            Err(Error::ProcessingFailed(ProcessingError::OutOfMemory(
                "huge".to_string(),
            ))),
        );

        assert!(matches!(outcome, CommitOutcome::Failed(ref err) if err.is_retryable()));
        assert_eq!(session.transform(), before);
        assert_eq!(session.source(), &ImageRef::new("photo.png"));
        assert!(session.can_commit());
    }

    #[test]
    fn results_after_dismiss_are_discarded() {
        let mut session = square_session();
        let ticket = session.begin_commit().unwrap();
        session.dismiss();

        let outcome = session.finish_commit(ticket, Ok(ImageRef::new("late.jpg")));
        assert_eq!(outcome, CommitOutcome::Discarded);
        assert_eq!(session.begin_commit(), Err(Error::SessionClosed));
    }

    #[test]
    fn completed_commit_closes_session() {
        let mut session = square_session();
        let ticket = session.begin_commit().unwrap();
        let outcome = session.finish_commit(ticket, Ok(ImageRef::new("out.jpg")));
        assert_eq!(outcome, CommitOutcome::Completed(ImageRef::new("out.jpg")));
        assert!(session.is_closed());

        let before = session.transform();
        session.toggle_flip();
        assert_eq!(session.transform(), before);
    }

    #[test]
    fn flip_and_reset_notify_observers() {
        let mut session = square_session();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session.subscribe(move |state, transition| {
            sink.lock().unwrap().push((state.flip_horizontal, transition));
        });

        session.toggle_flip();
        session.reset();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(true, Transition::Immediate), (false, Transition::Animated)]
        );
        assert_eq!(session.transform(), TransformState::identity());
    }

    #[test]
    fn flip_is_carried_into_plan() {
        let mut session = square_session();
        session.toggle_flip();
        assert!(session.preview_plan().flip_horizontal);
    }

    #[tokio::test]
    async fn commit_retries_after_processing_failure() {
        let mut session = square_session();
        let orchestrator = flaky(1);

        let err = session.commit(&orchestrator).await.expect_err("first attempt fails");
        assert!(err.is_retryable());
        assert!(session.can_commit());

        let image = session.commit(&orchestrator).await.expect("retry succeeds");
        assert_eq!(image, ImageRef::new("cropped.jpg"));
        assert!(session.is_closed());
    }
}
