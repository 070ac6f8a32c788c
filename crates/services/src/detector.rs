//! Hand detection boundary: frames in, landmark lists out.
//!
//! The real detector (camera plus pose model) lives outside this crate;
//! everything here is the contract it must satisfy, plus a scripted
//! implementation that replays recorded landmarks for tests and the
//! `replay` command.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use handcards_core::gesture::Landmark;

use crate::error::DetectorError;

/// One webcam frame as seen by the detection loop.
///
/// `captured_at` is the frame's own capture timestamp; the loop uses it for
/// cooldown arithmetic so a replayed stream behaves identically every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrame {
    pub seq: u64,
    pub captured_at: DateTime<Utc>,
}

/// The two knobs handed to the pose model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Mirror frames before detection, matching a selfie-view camera.
    pub flip_horizontal: bool,
    /// Upper bound on hands reported per frame.
    pub max_hands: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            flip_horizontal: true,
            max_hands: 1,
        }
    }
}

//
// ─── BOUNDARY TRAITS ───────────────────────────────────────────────────────────
//

/// Contract for a hand pose detector.
#[async_trait]
pub trait HandDetector: Send + Sync {
    fn config(&self) -> DetectorConfig {
        DetectorConfig::default()
    }

    /// Detect hands in one frame. Returns at most `config().max_hands`
    /// entries, each a full landmark list for one hand.
    ///
    /// # Errors
    ///
    /// Returns `DetectorError::Failed` when this frame could not be
    /// processed; the loop logs it and moves on.
    async fn detect(&self, frame: &VideoFrame) -> Result<Vec<Vec<Landmark>>, DetectorError>;
}

/// Contract for whatever produces frames, webcam or replay.
#[async_trait]
pub trait FrameSource: Send {
    /// The next frame, or `None` once the stream ends.
    async fn next_frame(&mut self) -> Option<VideoFrame>;
}

//
// ─── SCRIPTED REPLAY ───────────────────────────────────────────────────────────
//

const DEFAULT_DELTA_MS: i64 = 33;

fn default_delta_ms() -> i64 {
    DEFAULT_DELTA_MS
}

/// One recorded frame: the hands seen in it and the time since the frame
/// before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedFrame {
    /// Milliseconds since the previous frame (or the stream start for the
    /// first frame). Defaults to one frame at roughly 30 fps.
    #[serde(default = "default_delta_ms")]
    pub delta_ms: i64,
    /// Hands visible in this frame, each a full landmark list.
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

impl ScriptedFrame {
    /// A frame with no hands in view.
    #[must_use]
    pub fn empty(delta_ms: i64) -> Self {
        Self {
            delta_ms,
            hands: Vec::new(),
        }
    }

    /// A frame showing a single hand.
    #[must_use]
    pub fn single_hand(delta_ms: i64, landmarks: Vec<Landmark>) -> Self {
        Self {
            delta_ms,
            hands: vec![landmarks],
        }
    }
}

/// A recorded landmark stream, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkScript {
    pub frames: Vec<ScriptedFrame>,
}

impl LandmarkScript {
    #[must_use]
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        Self { frames }
    }

    /// Parse a script from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error for malformed scripts.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Split the script into a frame source and a detector that replays it,
    /// with frame timestamps laid out from `start`.
    #[must_use]
    pub fn into_replay(self, start: DateTime<Utc>) -> (ScriptedFrameSource, ScriptedDetector) {
        let mut frames = VecDeque::with_capacity(self.frames.len());
        let mut hands_by_seq = HashMap::with_capacity(self.frames.len());
        let mut at = start;
        for (seq, frame) in self.frames.into_iter().enumerate() {
            let seq = seq as u64;
            at += Duration::milliseconds(frame.delta_ms);
            frames.push_back(VideoFrame {
                seq,
                captured_at: at,
            });
            hands_by_seq.insert(seq, frame.hands);
        }
        (
            ScriptedFrameSource { frames },
            ScriptedDetector {
                config: DetectorConfig::default(),
                hands_by_seq,
            },
        )
    }
}

/// Frame source that yields a script's frames in order.
#[derive(Debug, Clone)]
pub struct ScriptedFrameSource {
    frames: VecDeque<VideoFrame>,
}

#[async_trait]
impl FrameSource for ScriptedFrameSource {
    async fn next_frame(&mut self) -> Option<VideoFrame> {
        self.frames.pop_front()
    }
}

/// Detector that replays recorded hands keyed by frame sequence number.
#[derive(Debug, Clone)]
pub struct ScriptedDetector {
    config: DetectorConfig,
    hands_by_seq: HashMap<u64, Vec<Vec<Landmark>>>,
}

impl ScriptedDetector {
    #[must_use]
    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl HandDetector for ScriptedDetector {
    fn config(&self) -> DetectorConfig {
        self.config
    }

    async fn detect(&self, frame: &VideoFrame) -> Result<Vec<Vec<Landmark>>, DetectorError> {
        let mut hands = self
            .hands_by_seq
            .get(&frame.seq)
            .cloned()
            .unwrap_or_default();
        hands.truncate(self.config.max_hands);
        Ok(hands)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use handcards_core::time::fixed_now;

    fn one_point_hand() -> Vec<Landmark> {
        vec![Landmark::new(1.0, 2.0)]
    }

    #[tokio::test]
    async fn replay_lays_out_cumulative_timestamps() {
        let script = LandmarkScript::new(vec![
            ScriptedFrame::empty(100),
            ScriptedFrame::empty(50),
            ScriptedFrame::empty(1500),
        ]);
        let (mut source, _) = script.into_replay(fixed_now());

        let deltas = [100, 150, 1650];
        for (seq, total) in deltas.into_iter().enumerate() {
            let frame = source.next_frame().await.unwrap();
            assert_eq!(frame.seq, seq as u64);
            assert_eq!(frame.captured_at, fixed_now() + Duration::milliseconds(total));
        }
        assert_eq!(source.next_frame().await, None);
    }

    #[tokio::test]
    async fn detector_replays_hands_for_their_frames() {
        let script = LandmarkScript::new(vec![
            ScriptedFrame::empty(33),
            ScriptedFrame::single_hand(33, one_point_hand()),
        ]);
        let (mut source, detector) = script.into_replay(fixed_now());

        let first = source.next_frame().await.unwrap();
        assert_eq!(detector.detect(&first).await.unwrap(), Vec::<Vec<Landmark>>::new());

        let second = source.next_frame().await.unwrap();
        assert_eq!(detector.detect(&second).await.unwrap(), vec![one_point_hand()]);
    }

    #[tokio::test]
    async fn detector_honors_the_max_hands_knob() {
        let frame = ScriptedFrame {
            delta_ms: 33,
            hands: vec![one_point_hand(), one_point_hand()],
        };
        let (mut source, detector) = LandmarkScript::new(vec![frame]).into_replay(fixed_now());
        let video_frame = source.next_frame().await.unwrap();

        assert_eq!(detector.detect(&video_frame).await.unwrap().len(), 1);

        let wide = detector.clone().with_config(DetectorConfig {
            flip_horizontal: true,
            max_hands: 2,
        });
        assert_eq!(wide.detect(&video_frame).await.unwrap().len(), 2);
    }

    #[test]
    fn script_parses_with_default_frame_gap() {
        let script = LandmarkScript::parse(
            r#"{ "frames": [ { "hands": [[{ "x": 1.0, "y": 2.0 }]] }, { "delta_ms": 2000 } ] }"#,
        )
        .unwrap();

        assert_eq!(script.frames.len(), 2);
        assert_eq!(script.frames[0].delta_ms, DEFAULT_DELTA_MS);
        assert_eq!(script.frames[0].hands, vec![one_point_hand()]);
        assert_eq!(script.frames[1].delta_ms, 2000);
        assert!(script.frames[1].hands.is_empty());
    }

    #[test]
    fn malformed_script_is_a_decode_error() {
        assert!(LandmarkScript::parse("{ not json").is_err());
    }
}
