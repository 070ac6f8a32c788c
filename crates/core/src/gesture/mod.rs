mod classifier;
mod landmarks;

pub use classifier::{Gesture, THUMBS_DOWN_MARGIN, THUMBS_UP_MARGIN, classify};
pub use landmarks::{LANDMARKS_PER_HAND, Landmark, keypoint};
