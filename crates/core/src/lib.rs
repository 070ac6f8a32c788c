#![forbid(unsafe_code)]

pub mod gesture;
pub mod model;
pub mod session;
pub mod time;

pub use gesture::{Gesture, Landmark, classify};
pub use model::{CardDraft, CardId, CardStatus, Flashcard};
pub use session::{GestureDisposition, GestureOutcome, ReviewSession};
pub use time::Clock;
