use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown card status: {0}")]
    Unknown(String),
}

//
// ─── CARD STATUS ───────────────────────────────────────────────────────────────
//

/// Review status of a card.
///
/// One closed set covering both the statuses a card is created with and the
/// ones the gesture handler writes:
/// - `New`: just saved, never reviewed
/// - `Learning` / `Mastered` / `Difficult`: manual progression marks
/// - `Easy`: marked by a thumbs-up during review
/// - `Wrong`: marked by a thumbs-down during review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CardStatus {
    #[default]
    New,
    Learning,
    Mastered,
    Difficult,
    Easy,
    Wrong,
}

impl CardStatus {
    /// All statuses, in declaration order.
    pub const ALL: [CardStatus; 6] = [
        CardStatus::New,
        CardStatus::Learning,
        CardStatus::Mastered,
        CardStatus::Difficult,
        CardStatus::Easy,
        CardStatus::Wrong,
    ];

    /// The exact string persisted for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::New => "New",
            CardStatus::Learning => "Learning",
            CardStatus::Mastered => "Mastered",
            CardStatus::Difficult => "Difficult",
            CardStatus::Easy => "Easy",
            CardStatus::Wrong => "Wrong",
        }
    }

    /// Parses a persisted status string.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::Unknown` for anything outside the closed set.
    pub fn parse(s: &str) -> Result<Self, StatusError> {
        match s {
            "New" => Ok(CardStatus::New),
            "Learning" => Ok(CardStatus::Learning),
            "Mastered" => Ok(CardStatus::Mastered),
            "Difficult" => Ok(CardStatus::Difficult),
            "Easy" => Ok(CardStatus::Easy),
            "Wrong" => Ok(CardStatus::Wrong),
            other => Err(StatusError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
