use log::info;

use handcards_core::model::{CardDraft, CardId, Flashcard};
use storage::repository::CardStore;

use crate::Clock;
use crate::error::CaptureError;
use crate::selection::SelectionTracker;

/// Turns captured selections into saved cards.
#[derive(Clone)]
pub struct CaptureService {
    clock: Clock,
    cards: CardStore,
}

impl CaptureService {
    #[must_use]
    pub fn new(clock: Clock, cards: CardStore) -> Self {
        Self { clock, cards }
    }

    /// Validate front/back text, mint an id, and append to the collection.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Validation` when either side trims to nothing.
    /// Returns `CaptureError::Storage` if persistence fails.
    pub async fn save_card(&self, front: &str, back: &str) -> Result<Flashcard, CaptureError> {
        let card = CardDraft::new(front, back)
            .validate()?
            .assign_id(CardId::random(self.clock.now()));
        self.cards.append(card.clone()).await?;
        info!("saved card {}", card.id);
        Ok(card)
    }

    /// Save a card fronted by the tracker's latest selection.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::NoSelection` when nothing was captured, plus
    /// everything `save_card` can return.
    pub async fn save_selection(
        &self,
        tracker: &SelectionTracker,
        back: &str,
    ) -> Result<Flashcard, CaptureError> {
        let front = tracker.latest().ok_or(CaptureError::NoSelection)?;
        self.save_card(front, back).await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
