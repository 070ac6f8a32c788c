use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the random portion of a generated id.
const SUFFIX_LEN: usize = 6;

/// Opaque unique identifier for a `Flashcard`.
///
/// Generated ids are the creation timestamp in milliseconds joined to a short
/// random suffix, e.g. `1714503991123-k3j9qz`. Uniqueness is best-effort:
/// nothing enforces it, the random suffix just makes collisions between cards
/// created in the same millisecond unlikely.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wraps an existing id, e.g. one read back from storage.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id from a timestamp and a caller-supplied RNG.
    #[must_use]
    pub fn generate(now: DateTime<Utc>, rng: &mut impl Rng) -> Self {
        let suffix: String = rng
            .sample_iter(Alphanumeric)
            .take(SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self(format!("{}-{}", now.timestamp_millis(), suffix))
    }

    /// Mints a fresh id using the thread RNG.
    #[must_use]
    pub fn random(now: DateTime<Utc>) -> Self {
        Self::generate(now, &mut rand::rng())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
