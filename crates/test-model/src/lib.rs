//! A local fake completion service for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use pocket_chat_model::{
    ChatMessage, Completion, CompletionProvider, CompletionProviderError,
    CompletionRequest, ErrorKind,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl CompletionProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake completion service.
///
/// Before sending requests, you need to setup the conversation script,
/// which is one preset reply per user turn. The reply is selected by
/// counting the user messages in the incoming request, so sending the
/// same request twice yields the same reply. Requests past the end of
/// the script fail with an error.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Vec<PresetReply>,
}

impl ScriptedProvider {
    /// Appends the reply for the next user turn.
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.replies.push(reply);
    }
}

impl CompletionProvider for ScriptedProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        let user_turns = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, ChatMessage::User { .. }))
            .count();

        let result = 'blk: {
            if user_turns == 0 {
                break 'blk Err(Error {
                    message: "no user message in the request",
                    kind: ErrorKind::Other,
                });
            }
            let Some(reply) = self.replies.get(user_turns - 1) else {
                break 'blk Err(Error {
                    message: "no more scripted replies",
                    kind: ErrorKind::Other,
                });
            };
            match reply {
                PresetReply::Message(text) => {
                    Ok(Completion::with_message(ChatMessage::assistant(
                        text.clone(),
                    )))
                }
                PresetReply::Empty => Ok(Completion::default()),
                PresetReply::Failure(kind) => Err(Error {
                    message: "scripted failure",
                    kind: *kind,
                }),
            }
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_of(messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest { messages }
    }

    #[tokio::test]
    async fn test_scripted_replies() {
        let mut provider = ScriptedProvider::default();
        provider.add_reply(PresetReply::message("Hello, world!"));
        provider.add_reply(PresetReply::Empty);

        let req = request_of(vec![
            ChatMessage::system("Be brief."),
            ChatMessage::user("Hi"),
        ]);
        let completion = provider.complete(&req).await.unwrap();
        assert_eq!(
            completion.message,
            Some(ChatMessage::assistant("Hello, world!"))
        );

        // The same request selects the same reply.
        let completion = provider.complete(&req).await.unwrap();
        assert_eq!(
            completion.message,
            Some(ChatMessage::assistant("Hello, world!"))
        );

        let req = request_of(vec![
            ChatMessage::system("Be brief."),
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello, world!"),
            ChatMessage::user("Anyone there?"),
        ]);
        let completion = provider.complete(&req).await.unwrap();
        assert_eq!(completion.message, None);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mut provider = ScriptedProvider::default();
        provider.add_reply(PresetReply::Failure(ErrorKind::Network));

        let req = request_of(vec![ChatMessage::user("Hi")]);
        let err = provider.complete(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_exhausted_script() {
        let provider = ScriptedProvider::default();
        let req = request_of(vec![ChatMessage::user("Hi")]);
        let err = provider.complete(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
