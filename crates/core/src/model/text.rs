use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Non-empty text with a phantom marker for which side of a card it is.
///
/// The captured selection and the typed answer are both free-form text; the
/// marker keeps a front from being handed to an API that expects a back.
/// Input is trimmed before the emptiness check, matching how selections are
/// captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Text<T>(String, #[serde(skip)] std::marker::PhantomData<T>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Front;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Back;

pub type FrontText = Text<Front>;
pub type BackText = Text<Back>;

impl<T> Text<T> {
    /// Trim and validate.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if nothing remains after trimming.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_string(), std::marker::PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> std::fmt::Display for Text<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
