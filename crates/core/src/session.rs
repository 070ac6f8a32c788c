//! In-memory review session over a loaded card collection.
//!
//! The session owns card order, the currently shown card, back visibility
//! and the gesture cooldown. It never touches storage: callers decide if
//! and when status changes are written back. The gesture path deliberately
//! does not persist at all, so marks made by hand gestures last only as
//! long as the session.

use chrono::{DateTime, Duration, Utc};

use crate::gesture::Gesture;
use crate::model::{CardId, CardStatus, Flashcard};

/// Once a gesture fires, further gestures are ignored for this long.
/// Keeps a hand held in front of the camera from firing once per frame.
pub const GESTURE_COOLDOWN_MS: i64 = 1500;

//
// ─── GESTURE DISPOSITION ───────────────────────────────────────────────────────
//

/// What a recognized gesture did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureDisposition {
    /// The gesture took effect; details in the outcome.
    Applied(GestureOutcome),
    /// A previous gesture fired less than [`GESTURE_COOLDOWN_MS`] ago.
    CoolingDown,
    /// No cards are loaded, so there is nothing to act on.
    NoCards,
}

/// Effect of a single applied gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureOutcome {
    pub gesture: Gesture,
    /// Card that was showing when the gesture fired.
    pub card_id: CardId,
    /// Status written to that card, if the gesture carries one.
    pub status: Option<CardStatus>,
    /// Index of the card now showing.
    pub advanced_to: usize,
}

//
// ─── REVIEW SESSION ────────────────────────────────────────────────────────────
//

/// Review state machine: one card showing at a time, wrapping navigation,
/// gesture effects gated by a cooldown. Status marks touch only the loaded
/// copy; nothing here writes back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewSession {
    cards: Vec<Flashcard>,
    current: usize,
    back_visible: bool,
    cooldown_until: Option<DateTime<Utc>>,
}

impl ReviewSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded cards, returning to the first card with the
    /// back hidden and no cooldown pending.
    pub fn load(&mut self, cards: Vec<Flashcard>) {
        self.cards = cards;
        self.current = 0;
        self.back_visible = false;
        self.cooldown_until = None;
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    #[must_use]
    pub fn back_visible(&self) -> bool {
        self.back_visible
    }

    /// True while a gesture fired less than the cooldown window before `at`.
    #[must_use]
    pub fn in_cooldown(&self, at: DateTime<Utc>) -> bool {
        self.cooldown_until.is_some_and(|until| at < until)
    }

    pub fn reveal_back(&mut self) {
        if !self.cards.is_empty() {
            self.back_visible = true;
        }
    }

    pub fn hide_back(&mut self) {
        self.back_visible = false;
    }

    /// Advance to the next card, wrapping past the end. Hides the back.
    /// Does nothing when no cards are loaded.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.cards.len();
        self.back_visible = false;
    }

    /// Step back to the previous card, wrapping before the start. Hides
    /// the back. Does nothing when no cards are loaded.
    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len();
        self.current = (self.current + len - 1) % len;
        self.back_visible = false;
    }

    /// Set the current card's status in memory, returning its id.
    ///
    /// The change is not written anywhere; a caller that wants it to
    /// survive the session must persist it separately.
    pub fn mark_current(&mut self, status: CardStatus) -> Option<CardId> {
        let card = self.cards.get_mut(self.current)?;
        card.status = status;
        Some(card.id.clone())
    }

    /// Apply a recognized gesture at frame time `at`.
    ///
    /// Thumbs-up marks the showing card easy, thumbs-down marks it wrong,
    /// a palm only advances. Every applied gesture moves to the next card
    /// and arms the cooldown; while the cooldown holds, gestures report
    /// [`GestureDisposition::CoolingDown`] and change nothing. Manual
    /// navigation is never gated.
    ///
    /// Timing comes from `at` rather than a wall clock so replayed frame
    /// streams behave identically every run.
    pub fn apply_gesture(&mut self, gesture: Gesture, at: DateTime<Utc>) -> GestureDisposition {
        if self.cards.is_empty() {
            return GestureDisposition::NoCards;
        }
        if self.in_cooldown(at) {
            return GestureDisposition::CoolingDown;
        }
        self.cooldown_until = Some(at + Duration::milliseconds(GESTURE_COOLDOWN_MS));

        let status = status_for_gesture(gesture);
        let card_id = match status {
            Some(status) => match self.mark_current(status) {
                Some(id) => id,
                None => return GestureDisposition::NoCards,
            },
            None => match self.current_card() {
                Some(card) => card.id.clone(),
                None => return GestureDisposition::NoCards,
            },
        };
        self.next();

        GestureDisposition::Applied(GestureOutcome {
            gesture,
            card_id,
            status,
            advanced_to: self.current,
        })
    }
}

/// Status a gesture writes to the showing card, if any.
#[must_use]
pub fn status_for_gesture(gesture: Gesture) -> Option<CardStatus> {
    match gesture {
        Gesture::ThumbsUp => Some(CardStatus::Easy),
        Gesture::ThumbsDown => Some(CardStatus::Wrong),
        Gesture::Palm => None,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
