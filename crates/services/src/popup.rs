//! Presentation-agnostic view of the review surface.
//!
//! This is intentionally **not** a UI view-model:
//! - no layout or widget types
//! - no localization assumptions
//!
//! The shell decides how to render; nothing else formats cards.

use std::fmt;

use handcards_core::model::CardStatus;
use handcards_core::session::{GestureOutcome, ReviewSession};

use crate::error::DetectorError;

/// Shown when the popup opens with no captured selection.
pub const NO_TEXT_PLACEHOLDER: &str = "(No text captured or error occurred)";

/// Shown when the stored collection cannot be read.
pub const LOAD_ERROR_PLACEHOLDER: &str = "(Error loading cards)";

/// Shown when the collection is empty.
pub const NO_CARDS_PLACEHOLDER: &str = "No cards yet. Save a selection to create one.";

/// Badge color for a status. One map covers every status.
#[must_use]
pub fn status_color(status: CardStatus) -> &'static str {
    match status {
        CardStatus::New => "#9e9e9e",
        CardStatus::Learning => "#42a5f5",
        CardStatus::Mastered => "#ab47bc",
        CardStatus::Difficult => "#ffa726",
        CardStatus::Easy => "#66bb6a",
        CardStatus::Wrong => "#ef5350",
    }
}

/// 1-based position of the showing card, e.g. `3/10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for CardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// Snapshot of what the review surface shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub front: String,
    /// Present only while the back is revealed.
    pub back: Option<String>,
    pub position: CardPosition,
    pub status: CardStatus,
    pub status_color: &'static str,
}

impl PopupView {
    /// Snapshot the session's showing card, or `None` when it has none.
    #[must_use]
    pub fn from_session(session: &ReviewSession) -> Option<Self> {
        let card = session.current_card()?;
        Some(Self {
            front: card.front.as_str().to_owned(),
            back: session
                .back_visible()
                .then(|| card.back.as_str().to_owned()),
            position: CardPosition {
                index: session.current_index() + 1,
                total: session.len(),
            },
            status: card.status,
            status_color: status_color(card.status),
        })
    }
}

/// One-line caption for an applied gesture.
#[must_use]
pub fn gesture_caption(outcome: &GestureOutcome) -> String {
    match outcome.status {
        Some(status) => format!("{} marked the card {status}", outcome.gesture),
        None => format!("{} advanced to the next card", outcome.gesture),
    }
}

/// Status line shown when the detector cannot be started. Review stays
/// manual; only gesture input is missing.
#[must_use]
pub fn camera_status(error: &DetectorError) -> String {
    format!("(Camera error: {error})")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use handcards_core::gesture::Gesture;
    use handcards_core::model::{CardDraft, CardId};
    use handcards_core::time::fixed_now;

    fn loaded_session() -> ReviewSession {
        let cards = [("Hello", "World"), ("tremplin", "springboard")]
            .into_iter()
            .enumerate()
            .map(|(n, (front, back))| {
                CardDraft::new(front, back)
                    .validate()
                    .unwrap()
                    .assign_id(CardId::new(format!("1714503991123-c{n:05}")))
            })
            .collect();
        let mut session = ReviewSession::new();
        session.load(cards);
        session
    }

    #[test]
    fn view_hides_the_back_until_revealed() {
        let mut session = loaded_session();
        let view = PopupView::from_session(&session).unwrap();
        assert_eq!(view.front, "Hello");
        assert_eq!(view.back, None);
        assert_eq!(view.position.to_string(), "1/2");
        assert_eq!(view.status, CardStatus::New);

        session.reveal_back();
        let view = PopupView::from_session(&session).unwrap();
        assert_eq!(view.back.as_deref(), Some("World"));
    }

    #[test]
    fn view_tracks_the_showing_card() {
        let mut session = loaded_session();
        session.next();
        let view = PopupView::from_session(&session).unwrap();
        assert_eq!(view.front, "tremplin");
        assert_eq!(view.position.to_string(), "2/2");
    }

    #[test]
    fn empty_session_has_no_view() {
        assert_eq!(PopupView::from_session(&ReviewSession::new()), None);
    }

    #[test]
    fn every_status_has_its_own_color() {
        let colors: std::collections::HashSet<_> =
            CardStatus::ALL.iter().map(|s| status_color(*s)).collect();
        assert_eq!(colors.len(), CardStatus::ALL.len());
    }

    #[test]
    fn captions_name_the_effect() {
        let marked = GestureOutcome {
            gesture: Gesture::ThumbsUp,
            card_id: CardId::new("1714503991123-k3j9qz"),
            status: Some(CardStatus::Easy),
            advanced_to: 1,
        };
        assert_eq!(gesture_caption(&marked), "thumbs up marked the card Easy");

        let advanced = GestureOutcome {
            gesture: Gesture::Palm,
            card_id: CardId::new("1714503991123-k3j9qz"),
            status: None,
            advanced_to: 1,
        };
        assert_eq!(gesture_caption(&advanced), "palm advanced to the next card");
    }

    #[test]
    fn camera_status_names_the_cause() {
        let error = DetectorError::Unavailable("no camera device".into());
        assert_eq!(
            camera_status(&error),
            "(Camera error: detector unavailable: no camera device)"
        );
    }
}
