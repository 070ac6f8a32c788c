use std::path::PathBuf;
use std::sync::Arc;

use handcards_core::session::ReviewSession;
use storage::repository::CardStore;

use crate::Clock;
use crate::capture::CaptureService;
use crate::error::AppServicesError;

/// Assembles the services the shell works with.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    cards: CardStore,
    capture: Arc<CaptureService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, cards: CardStore) -> Self {
        let capture = Arc::new(CaptureService::new(clock, cards.clone()));
        Self {
            clock,
            cards,
            capture,
        }
    }

    /// Build services backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self::new(clock, CardStore::json_file(path))
    }

    /// Build services backed by an in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, CardStore::in_memory())
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn cards(&self) -> CardStore {
        self.cards.clone()
    }

    #[must_use]
    pub fn capture(&self) -> Arc<CaptureService> {
        Arc::clone(&self.capture)
    }

    /// Load the collection into a fresh review session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the collection cannot be read.
    pub async fn start_review(&self) -> Result<ReviewSession, AppServicesError> {
        let cards = self.cards.load_all().await?;
        let mut session = ReviewSession::new();
        session.load(cards);
        Ok(session)
    }
}
