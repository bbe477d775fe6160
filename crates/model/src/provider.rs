use std::error::Error;

use crate::error::ErrorKind;
use crate::request::CompletionRequest;
use crate::response::Completion;

/// The error type for a completion provider.
pub trait CompletionProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a completion service, which turns a message
/// list into a generated continuation.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
pub trait CompletionProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: CompletionProviderError;

    /// Sends the message list to the service and resolves with the
    /// generated continuation.
    ///
    /// Implementations issue exactly one request per call; callers own
    /// any retry policy (the chat client has none).
    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static;
}
