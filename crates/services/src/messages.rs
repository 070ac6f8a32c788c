//! Wire shapes exchanged between the capture side and the popup side.
//!
//! The JSON spellings are frozen: peers already speak them, so the serde
//! attributes here are contract, not style.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message on the capture/popup channel, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtensionMessage {
    /// Pushed whenever a new text selection is captured.
    #[serde(rename = "CONTENT_SCRIPT_SELECTION")]
    Selection { text: String },
    /// Sent by the popup on open to pull the latest selection.
    #[serde(rename = "POPUP_GET_SELECTED_TEXT")]
    GetSelectedText,
}

impl ExtensionMessage {
    /// Parse a raw message value. Unknown or malformed messages read as
    /// `None` and are ignored by receivers, never treated as an error.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Reply to [`ExtensionMessage::GetSelectedText`]: the latest selection, or
/// `null` when none was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReply {
    pub text: Option<String>,
}

impl SelectionReply {
    #[must_use]
    pub fn none() -> Self {
        Self { text: None }
    }

    /// Read a reply value. A missing or malformed reply means "no text";
    /// the popup shows its placeholder rather than failing.
    #[must_use]
    pub fn parse(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_else(Self::none)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
