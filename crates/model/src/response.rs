use crate::ChatMessage;

/// A fully received response from the completion provider.
///
/// Providers resolve to this after the underlying transport has been
/// consumed. A response with no message is a successful call where the
/// service simply produced nothing usable (for example, an empty choice
/// list); it is not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Completion {
    /// The message from the first choice, if the service produced one.
    pub message: Option<ChatMessage>,
}

impl Completion {
    /// Creates a completion carrying the given message.
    #[inline]
    pub fn with_message(message: ChatMessage) -> Self {
        Self {
            message: Some(message),
        }
    }

    /// Returns the message if it has non-empty content.
    #[inline]
    pub fn non_empty_message(&self) -> Option<&ChatMessage> {
        self.message.as_ref().filter(|msg| !msg.content().is_empty())
    }
}
