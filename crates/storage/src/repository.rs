use async_trait::async_trait;
use chrono::DateTime;
use handcards_core::model::{
    BackText, CardId, CardStatus, Flashcard, FrontText, StatusError, TextError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage key holding the entire card collection.
pub const FLASHCARDS_KEY: &str = "flashcards";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Errors mapping a persisted record back into a domain card.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("invalid front text: {0}")]
    Front(#[source] TextError),

    #[error("invalid back text: {0}")]
    Back(#[source] TextError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

//
// ─── CARD RECORD ───────────────────────────────────────────────────────────────
//

/// Persisted shape for a card.
///
/// This mirrors the domain `Flashcard` so the store can serialize without
/// leaking storage concerns into the domain layer. Field names and the
/// epoch-millisecond timestamps match the JSON the collection has always
/// been written in, so existing data loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub front: String,
    pub back: String,
    /// Absent in cards written before statuses existed; reads as `New`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<i64>,
}

impl CardRecord {
    #[must_use]
    pub fn from_card(card: &Flashcard) -> Self {
        Self {
            id: card.id.as_str().to_owned(),
            front: card.front.as_str().to_owned(),
            back: card.back.as_str().to_owned(),
            status: Some(card.status.as_str().to_owned()),
            last_reviewed: card.last_reviewed.map(|t| t.timestamp_millis()),
            next_review: card.next_review.map(|t| t.timestamp_millis()),
        }
    }

    /// Convert the record back into a domain `Flashcard`.
    ///
    /// Timestamps outside the representable range read as unset; both fields
    /// are dead weight nothing consults, so a lossy read changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if front/back fail validation or the status
    /// string is outside the known set.
    pub fn into_card(self) -> Result<Flashcard, RecordError> {
        let front = FrontText::parse(self.front).map_err(RecordError::Front)?;
        let back = BackText::parse(self.back).map_err(RecordError::Back)?;
        let status = match self.status.as_deref() {
            Some(s) => CardStatus::parse(s)?,
            None => CardStatus::default(),
        };

        Ok(Flashcard {
            id: CardId::new(self.id),
            front,
            back,
            status,
            last_reviewed: self.last_reviewed.and_then(DateTime::from_timestamp_millis),
            next_review: self.next_review.and_then(DateTime::from_timestamp_millis),
        })
    }
}

//
// ─── KEY-VALUE BOUNDARY ────────────────────────────────────────────────────────
//

/// Contract for the platform key-value store the collection lives in.
///
/// Values are structured JSON. There is no per-record addressing and no
/// conditional write: callers read a whole value, modify it, and write it
/// back, and the last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value under `key`, or `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Simple in-memory backend for testing and prototyping.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }
}

//
// ─── CARD STORE ────────────────────────────────────────────────────────────────
//

/// Whole-collection card storage over any key-value backend.
///
/// Every operation is a full read-modify-write of the one collection value
/// under [`FLASHCARDS_KEY`]. Concurrent writers race and the last write
/// wins; that matches how the collection has always been stored.
#[derive(Clone)]
pub struct CardStore {
    store: Arc<dyn KeyValueStore>,
}

impl CardStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Build a `CardStore` backed by an in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load the whole collection. A key that was never written reads as an
    /// empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is not a
    /// card list, or `StorageError::InvalidRecord` if a record no longer
    /// maps onto a valid card.
    pub async fn load_all(&self) -> Result<Vec<Flashcard>, StorageError> {
        let Some(value) = self.store.get(FLASHCARDS_KEY).await? else {
            return Ok(Vec::new());
        };
        let records: Vec<CardRecord> = serde_json::from_value(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        records
            .into_iter()
            .map(|r| {
                r.into_card()
                    .map_err(|e| StorageError::InvalidRecord(e.to_string()))
            })
            .collect()
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub async fn save_all(&self, cards: &[Flashcard]) -> Result<(), StorageError> {
        let records: Vec<CardRecord> = cards.iter().map(CardRecord::from_card).collect();
        let value = serde_json::to_value(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(FLASHCARDS_KEY, value).await
    }

    /// Append one card to the collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or written.
    pub async fn append(&self, card: Flashcard) -> Result<(), StorageError> {
        let mut cards = self.load_all().await?;
        cards.push(card);
        self.save_all(&cards).await
    }

    /// Set the status of the card with `id`, reporting whether it was found.
    /// A missing id is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or written.
    pub async fn update_status(
        &self,
        id: &CardId,
        status: CardStatus,
    ) -> Result<bool, StorageError> {
        let mut cards = self.load_all().await?;
        let Some(card) = cards.iter_mut().find(|c| &c.id == id) else {
            return Ok(false);
        };
        card.status = status;
        self.save_all(&cards).await?;
        Ok(true)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
