use std::pin::Pin;
use std::sync::Arc;

use pocket_chat_model::{
    Completion, CompletionProvider, CompletionProviderError,
    CompletionRequest,
};
use tracing::Instrument;

type CompleteResult = Result<Completion, Box<dyn CompletionProviderError>>;
type BoxedCompleteFuture =
    Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(CompletionRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a completion provider that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct CompletionClient {
    handler_fn: HandlerFn,
}

impl CompletionClient {
    #[inline]
    pub fn new<P: CompletionProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `CompletionClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.complete(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    handle_result::<P>(fut.await)
                }
                .instrument(trace_span!("completion client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and resolves with the provider's completion.
    #[inline]
    pub async fn complete(&self, req: CompletionRequest) -> CompleteResult {
        (self.handler_fn)(req).await
    }
}

fn handle_result<P: CompletionProvider + 'static>(
    result: Result<Completion, P::Error>,
) -> CompleteResult {
    match result {
        Ok(completion) => {
            trace!("got a completion: {completion:?}");
            Ok(completion)
        }
        Err(err) => {
            error!("got an error: {err:?}");
            Err(Box::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use pocket_chat_model::{ChatMessage, ErrorKind};
    use pocket_chat_test_model::{PresetReply, ScriptedProvider};

    use super::*;

    #[tokio::test]
    async fn test_complete() {
        let mut provider = ScriptedProvider::default();
        provider.add_reply(PresetReply::message("How are you?"));

        let client = CompletionClient::new(provider);

        for _ in 0..3 {
            let completion = client
                .complete(CompletionRequest {
                    messages: vec![ChatMessage::user("Hi")],
                })
                .await
                .unwrap();
            assert_eq!(
                completion.message,
                Some(ChatMessage::assistant("How are you?"))
            );
        }
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut provider = ScriptedProvider::default();
        provider.add_reply(PresetReply::Failure(ErrorKind::Network));

        let client = CompletionClient::new(provider);
        let err = client
            .complete(CompletionRequest {
                messages: vec![ChatMessage::user("Hi")],
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
