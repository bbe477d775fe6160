use pocket_chat_model::{ChatMessage, Completion, CompletionRequest};
use serde::{Deserialize, Serialize};

use crate::OpenAIConfig;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

// The message inside a choice. Parsed leniently: servers in the wild
// omit `content` for some finish states, and that must not fail the
// whole decode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChoiceMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

// `ChatMessage` already serializes to the `{"role", "content"}` wire
// shape, so the request borrows the caller's messages as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request<'a>(
    req: &'a CompletionRequest,
    config: &'a OpenAIConfig,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &config.model,
        messages: &req.messages,
    }
}

#[inline]
pub fn extract_completion(body: ChatCompletion) -> Completion {
    let message = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|msg| {
            let content = msg.content?;
            Some(match msg.role.as_deref() {
                Some("system") => ChatMessage::system(content),
                Some("user") => ChatMessage::user(content),
                _ => ChatMessage::assistant(content),
            })
        });
    Completion { message }
}
