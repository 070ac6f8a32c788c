//! Rule-based gesture classification over hand landmarks.
//!
//! The rules work on vertical (y) relationships between joints, which makes
//! them cheap and deterministic but sensitive to hand orientation: they
//! assume a roughly upright hand facing the camera. Horizontal or heavily
//! rotated hands classify as no gesture rather than guessing.

use serde::{Deserialize, Serialize};

use super::landmarks::{LANDMARKS_PER_HAND, Landmark, keypoint};

/// A thumbs-up only counts when the thumb tip rises above the index base by
/// more than this fraction of the index finger's own vertical span. Filters
/// out loose fists where the thumb barely peeks over the knuckles.
pub const THUMBS_UP_MARGIN: f32 = 0.30;

/// A thumbs-down only counts when the thumb tip drops below the index base
/// by more than this fraction of the wrist-to-middle-knuckle distance.
pub const THUMBS_DOWN_MARGIN: f32 = 0.10;

//
// ─── GESTURE ───────────────────────────────────────────────────────────────────
//

/// A recognized hand gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// Closed fist, thumb pointing up. Marks the current card as easy.
    ThumbsUp,
    /// Closed fist, thumb pointing down. Marks the current card as wrong.
    ThumbsDown,
    /// Open hand, all four fingers extended. Advances to the next card.
    Palm,
}

impl Gesture {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::ThumbsUp => "thumbs up",
            Gesture::ThumbsDown => "thumbs down",
            Gesture::Palm => "palm",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── CLASSIFICATION ────────────────────────────────────────────────────────────
//

/// (mcp, pip, tip) index triples for the four non-thumb fingers.
const FINGERS: [(usize, usize, usize); 4] = [
    (keypoint::INDEX_MCP, keypoint::INDEX_PIP, keypoint::INDEX_TIP),
    (keypoint::MIDDLE_MCP, keypoint::MIDDLE_PIP, keypoint::MIDDLE_TIP),
    (keypoint::RING_MCP, keypoint::RING_PIP, keypoint::RING_TIP),
    (keypoint::PINKY_MCP, keypoint::PINKY_PIP, keypoint::PINKY_TIP),
];

/// Classifies a single hand's landmarks into a gesture, if any.
///
/// Rules are checked in a fixed order so that ambiguous poses resolve
/// deterministically: thumbs-up, then thumbs-down, then palm. Anything
/// that satisfies none of them, including a landmark set shorter than
/// [`LANDMARKS_PER_HAND`], returns `None`.
#[must_use]
pub fn classify(landmarks: &[Landmark]) -> Option<Gesture> {
    if landmarks.len() < LANDMARKS_PER_HAND {
        return None;
    }

    let wrist = landmarks[keypoint::WRIST];
    let thumb_mcp = landmarks[keypoint::THUMB_MCP];
    let thumb_tip = landmarks[keypoint::THUMB_TIP];
    let index_mcp = landmarks[keypoint::INDEX_MCP];
    let index_pip = landmarks[keypoint::INDEX_PIP];
    let index_tip = landmarks[keypoint::INDEX_TIP];
    let middle_mcp = landmarks[keypoint::MIDDLE_MCP];

    let all_curled = FINGERS.iter().all(|&(mcp, _, tip)| {
        finger_curled(landmarks[mcp], landmarks[tip])
    });
    let all_extended = FINGERS.iter().all(|&(mcp, pip, tip)| {
        finger_extended(landmarks[mcp], landmarks[pip], landmarks[tip])
    });

    // Thumb orientation relative to its own base and the index knuckle.
    let thumb_up = thumb_tip.y < thumb_mcp.y && thumb_tip.y < index_pip.y;
    let thumb_down = thumb_tip.y > thumb_mcp.y && thumb_tip.y > index_pip.y;

    if thumb_up && all_curled {
        // Margin normalized by the index finger's vertical span so the rule
        // holds at any distance from the camera.
        let span = (index_mcp.y - index_tip.y).abs();
        let rise = index_mcp.y - thumb_tip.y;
        if rise > THUMBS_UP_MARGIN * span {
            return Some(Gesture::ThumbsUp);
        }
    }

    if thumb_down && all_curled {
        let reference = (middle_mcp.y - wrist.y).abs();
        let drop = thumb_tip.y - index_mcp.y;
        if drop > THUMBS_DOWN_MARGIN * reference {
            return Some(Gesture::ThumbsDown);
        }
    }

    if all_extended {
        return Some(Gesture::Palm);
    }

    None
}

/// A finger is extended when its joints stack tip over pip over mcp.
fn finger_extended(mcp: Landmark, pip: Landmark, tip: Landmark) -> bool {
    tip.y < pip.y && pip.y < mcp.y
}

/// A finger is curled when its tip has folded below its knuckle.
fn finger_curled(mcp: Landmark, tip: Landmark) -> bool {
    tip.y > mcp.y
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
