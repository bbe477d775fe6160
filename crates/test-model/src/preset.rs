use pocket_chat_model::ErrorKind;

/// The preset reply for one assistant turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresetReply {
    /// Resolve with an assistant message carrying this text.
    Message(String),
    /// Resolve successfully but with no message, like a response whose
    /// choice list is empty.
    Empty,
    /// Fail with an error of this kind.
    Failure(ErrorKind),
}

impl PresetReply {
    /// Creates a text reply.
    #[inline]
    pub fn message<S: Into<String>>(text: S) -> Self {
        Self::Message(text.into())
    }
}
