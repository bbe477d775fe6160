#[cfg(test)]
mod tests;

use pocket_chat_model::{ChatMessage, CompletionProvider, CompletionRequest};

use crate::client::CompletionClient;
use crate::conversation::Conversation;
use crate::store::{HISTORY_KEY, MemoryStore, Store};

/// The assistant text appended when the service resolves without a
/// usable message.
pub const NO_RESPONSE_TEXT: &str = "no response from model";

/// The assistant text appended when the completion call fails.
pub const SERVICE_FAILURE_TEXT: &str =
    "unable to reach the completion service";

/// Builds the outbound message list for one completion call: a freshly
/// synthesized system prompt followed by the full history.
///
/// The system prompt is never part of the stored history, so it goes
/// through here on every call. Kept as a plain function to make request
/// shaping testable without any I/O.
pub fn build_request(
    system_prompt: &str,
    history: &[ChatMessage],
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend_from_slice(history);
    CompletionRequest { messages }
}

/// [`Chat`] builder.
pub struct ChatBuilder {
    client: CompletionClient,
    store: Box<dyn Store>,
    system_prompt: String,
}

impl ChatBuilder {
    /// Creates a new builder with the specified completion provider.
    #[inline]
    pub fn with_completion_provider<P: CompletionProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            client: CompletionClient::new(provider),
            store: Box::new(MemoryStore::default()),
            system_prompt: String::new(),
        }
    }

    /// Sets the system prompt synthesized into every request.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the persistence store. Defaults to a private in-memory
    /// store.
    #[inline]
    pub fn with_store<S: Store + 'static>(mut self, store: S) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Builds the controller, restoring any history the store holds.
    pub fn build(self) -> Chat {
        let mut chat = Chat {
            client: self.client,
            store: self.store,
            system_prompt: self.system_prompt,
            conversation: Conversation::default(),
            pending_input: String::new(),
            busy: false,
        };
        chat.initialize();
        chat
    }
}

/// A conversation controller.
///
/// Owns the message history, the uncommitted input text and the busy
/// flag, and orchestrates persistence and the remote completion call.
/// Hosts construct one instance per session; there is no ambient global
/// state.
pub struct Chat {
    client: CompletionClient,
    store: Box<dyn Store>,
    system_prompt: String,
    conversation: Conversation,
    pending_input: String,
    busy: bool,
}

impl Chat {
    /// Restores the history from the store. An absent or unparseable
    /// value leaves the conversation empty without surfacing an error.
    fn initialize(&mut self) {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return;
        };
        match Conversation::from_json(&raw) {
            Ok(conversation) => self.conversation = conversation,
            Err(err) => {
                debug!("discarding unparseable stored history: {err}");
            }
        }
    }

    /// Returns the conversation history in append order.
    #[inline]
    pub fn history(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// Returns whether a completion call is currently outstanding.
    ///
    /// Hosts use this to disable their send action; a [`Chat::submit`]
    /// while busy is ignored, not queued.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the current uncommitted input text.
    #[inline]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the uncommitted input text.
    #[inline]
    pub fn set_pending_input<S: Into<String>>(&mut self, text: S) {
        self.pending_input = text.into();
    }

    /// Submits one user turn.
    ///
    /// A `text` that trims to nothing is silently ignored, as is a call
    /// while another one is outstanding. Otherwise this appends the
    /// user message, clears the pending input, issues exactly one
    /// completion call and appends the reply: the service's message
    /// when it has content, a placeholder assistant turn when it does
    /// not, and a failure notice when the call fails (the failure
    /// detail only goes to the logs). The history is re-persisted after
    /// each append, and the busy flag is released on every path.
    pub async fn submit(&mut self, text: &str) {
        if text.trim().is_empty() || self.busy {
            return;
        }

        self.conversation.push(ChatMessage::user(text));
        self.pending_input.clear();
        self.busy = true;
        self.persist();

        let req =
            build_request(&self.system_prompt, self.conversation.messages());
        let reply = match self.client.complete(req).await {
            Ok(completion) => match completion.non_empty_message() {
                Some(msg) => msg.clone(),
                None => ChatMessage::assistant(NO_RESPONSE_TEXT),
            },
            Err(err) => {
                warn!("completion call failed ({:?}): {err}", err.kind());
                ChatMessage::assistant(SERVICE_FAILURE_TEXT)
            }
        };

        self.conversation.push(reply);
        self.persist();
        self.busy = false;
    }

    /// Clears the conversation and removes the persisted value.
    ///
    /// Calling this on an already empty conversation has no observable
    /// effect.
    pub fn clear(&mut self) {
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            warn!("failed to remove the stored history: {err}");
        }
        self.conversation = Conversation::default();
    }

    /// Writes the full serialized history to the store. An empty
    /// history is never written; `clear` is the only way to drop the
    /// stored value.
    fn persist(&self) {
        if self.conversation.is_empty() {
            return;
        }
        match self.conversation.to_json() {
            Ok(raw) => {
                if let Err(err) = self.store.set(HISTORY_KEY, &raw) {
                    warn!("failed to persist the history: {err}");
                }
            }
            Err(err) => warn!("failed to serialize the history: {err}"),
        }
    }
}
