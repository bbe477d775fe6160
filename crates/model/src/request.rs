use serde::{Deserialize, Serialize};

/// A request to be sent to the completion provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionRequest {
    /// The input messages, system instructions first.
    pub messages: Vec<ChatMessage>,
}

/// One turn in a conversation.
///
/// The serialized form is `{"role": "...", "content": "..."}`, which is
/// what OpenAI-compatible endpoints exchange and what conversation
/// stores persist, so a stored history round-trips without conversion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    /// The system instructions.
    System {
        /// The instruction text.
        content: String,
    },
    /// A user input text.
    User {
        /// The input text.
        content: String,
    },
    /// An assistant text.
    Assistant {
        /// The generated text.
        content: String,
    },
}

impl ChatMessage {
    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    /// Returns the text content of this message, whatever the role.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            Self::System { content }
            | Self::User { content }
            | Self::Assistant { content } => content,
        }
    }
}
