use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    ids::CardId,
    status::CardStatus,
    text::{BackText, FrontText, TextError},
};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Raw capture input: the selected text and the typed answer, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
}

impl CardDraft {
    #[must_use]
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Trim and validate both sides.
    ///
    /// # Errors
    ///
    /// Returns `CardValidationError` when either side is empty after trimming.
    pub fn validate(self) -> Result<ValidatedCard, CardValidationError> {
        let front = FrontText::parse(self.front).map_err(CardValidationError::Front)?;
        let back = BackText::parse(self.back).map_err(CardValidationError::Back)?;
        Ok(ValidatedCard { front, back })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub front: FrontText,
    pub back: BackText,
}

impl ValidatedCard {
    /// Attach an id, producing a card in its initial state.
    #[must_use]
    pub fn assign_id(self, id: CardId) -> Flashcard {
        Flashcard {
            id,
            front: self.front,
            back: self.back,
            status: CardStatus::New,
            last_reviewed: None,
            next_review: None,
        }
    }
}

/// A saved flashcard.
///
/// `last_reviewed` and `next_review` are carried through storage but no
/// component writes or reads them; they are reserved for a scheduler that was
/// never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub id: CardId,
    pub front: FrontText,
    pub back: BackText,
    pub status: CardStatus,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    #[error("invalid front text: {0}")]
    Front(#[source] TextError),

    #[error("invalid back text: {0}")]
    Back(#[source] TextError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
