use serde::{Deserialize, Serialize};

/// Number of keypoints the hand pose model reports per detected hand.
pub const LANDMARKS_PER_HAND: usize = 21;

//
// ─── LANDMARK ──────────────────────────────────────────────────────────────────
//

/// A single hand keypoint in image coordinates.
///
/// The origin sits at the top-left corner of the frame and `y` grows
/// downward, so "above" in gesture terms means a *smaller* `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//
// ─── KEYPOINT INDICES ──────────────────────────────────────────────────────────
//

/// Indices into the 21-point hand skeleton.
///
/// Points run wrist first, then each finger base-to-tip: thumb 1..=4,
/// index 5..=8, middle 9..=12, ring 13..=16, pinky 17..=20.
pub mod keypoint {
    pub const WRIST: usize = 0;

    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;

    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;

    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;

    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;

    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}
