use log::debug;
use serde_json::Value;

use crate::messages::{ExtensionMessage, SelectionReply};

/// Capture-side selection state.
///
/// Selections arrive on every mouse-up; only trimmed non-empty text is
/// kept, and each new selection replaces the previous one. The popup pulls
/// the latest text on open via [`ExtensionMessage::GetSelectedText`].
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    latest: Option<String>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection, ignoring text that trims to nothing. Returns
    /// whether the selection was kept.
    pub fn record_selection(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        debug!("selection captured ({} chars)", trimmed.len());
        self.latest = Some(trimmed.to_owned());
        true
    }

    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }

    /// Handle one channel message. Selection pushes update the state and
    /// produce no reply; a pull produces the reply to send back.
    pub fn handle(&mut self, message: ExtensionMessage) -> Option<SelectionReply> {
        match message {
            ExtensionMessage::Selection { text } => {
                self.record_selection(&text);
                None
            }
            ExtensionMessage::GetSelectedText => Some(SelectionReply {
                text: self.latest.clone(),
            }),
        }
    }

    /// Handle a raw message value, ignoring anything that does not parse.
    pub fn handle_value(&mut self, value: &Value) -> Option<SelectionReply> {
        let message = ExtensionMessage::parse(value)?;
        self.handle(message)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
