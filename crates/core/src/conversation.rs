//! Conversation-related types.

use pocket_chat_model::ChatMessage;

/// An ordered conversation history.
///
/// Messages keep their append order and are never reordered or
/// deduplicated. The synthesized system prompt is not part of the
/// history; it only exists in outbound requests.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Returns the messages in append order.
    #[inline]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns whether the conversation holds no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, msg: ChatMessage) {
        self.messages.push(msg);
    }

    /// Serializes the history as a JSON array of role-tagged objects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.messages)
    }

    /// Parses a history previously produced by [`Conversation::to_json`].
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Ok(Self {
            messages: serde_json::from_str(raw)?,
        })
    }
}
