use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use handcards_core::gesture::{Gesture, classify};
use handcards_core::session::{GestureDisposition, ReviewSession};

use crate::detector::{FrameSource, HandDetector, VideoFrame};

//
// ─── STOP HANDLE ───────────────────────────────────────────────────────────────
//

/// Shared flag that tells a running detection loop to wind down.
///
/// Clone it before starting the loop and raise it from anywhere; the loop
/// checks it between frames.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

//
// ─── GESTURE LOOP ──────────────────────────────────────────────────────────────
//

/// What one frame produced, for rendering and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    pub frame: VideoFrame,
    /// Gesture recognized in this frame, if a hand classified as one.
    pub gesture: Option<Gesture>,
    /// How the session took the gesture; `None` when none fired.
    pub disposition: Option<GestureDisposition>,
}

/// Frame-by-frame gesture dispatch: detect, classify the first hand, and
/// feed the result to the session.
pub struct GestureLoop {
    detector: Arc<dyn HandDetector>,
    stop: StopHandle,
}

impl GestureLoop {
    #[must_use]
    pub fn new(detector: Arc<dyn HandDetector>) -> Self {
        let config = detector.config();
        debug!(
            "detector ready: flip_horizontal={}, max_hands={}",
            config.flip_horizontal, config.max_hands
        );
        Self {
            detector,
            stop: StopHandle::new(),
        }
    }

    /// Handle for stopping a loop started with [`GestureLoop::run`].
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Process a single frame against the session.
    ///
    /// A detector failure costs only this frame: it is logged and the
    /// outcome carries no gesture.
    pub async fn process_frame(
        &self,
        session: &mut ReviewSession,
        frame: VideoFrame,
    ) -> FrameOutcome {
        let hands = match self.detector.detect(&frame).await {
            Ok(hands) => hands,
            Err(e) => {
                warn!("frame {} skipped: {e}", frame.seq);
                return FrameOutcome {
                    frame,
                    gesture: None,
                    disposition: None,
                };
            }
        };

        let gesture = hands.first().and_then(|hand| classify(hand));
        let disposition = gesture.map(|g| {
            let disposition = session.apply_gesture(g, frame.captured_at);
            match &disposition {
                GestureDisposition::Applied(outcome) => {
                    debug!("frame {}: {g} applied to card {}", frame.seq, outcome.card_id);
                }
                GestureDisposition::CoolingDown => {
                    debug!("frame {}: {g} ignored, cooling down", frame.seq);
                }
                GestureDisposition::NoCards => {
                    debug!("frame {}: {g} ignored, no cards loaded", frame.seq);
                }
            }
            disposition
        });

        FrameOutcome {
            frame,
            gesture,
            disposition,
        }
    }

    /// Drive frames from `source` until it ends or the stop handle is
    /// raised, returning the outcome of every processed frame.
    pub async fn run(
        &self,
        session: &mut ReviewSession,
        source: &mut dyn FrameSource,
    ) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        while !self.stop.is_stopped() {
            let Some(frame) = source.next_frame().await else {
                break;
            };
            outcomes.push(self.process_frame(session, frame).await);
        }
        outcomes
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
