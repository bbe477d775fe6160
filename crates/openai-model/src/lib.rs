//! A completion provider for OpenAI-compatible APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use pocket_chat_model::{
    Completion, CompletionProvider, CompletionProviderError,
    CompletionRequest, ErrorKind,
};
use reqwest::{Client, header};

pub use config::{OpenAIConfig, OpenAIConfigBuilder};

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

/// OpenAI-compatible completion provider.
///
/// Issues one `POST {base_url}/chat/completions` per request and reads
/// the response body in full; there is no streaming.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl CompletionProvider for OpenAIProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let resp_fut = self
            .client
            .post(format!("{}{}", self.config.base_url, "/chat/completions"))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&openai_req)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Network,
                    ));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                return Err(Error::new(
                    format!("unexpected status: {status}"),
                    ErrorKind::Status,
                ));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_valid_content_type = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype().as_str() == "json")
                .unwrap_or(false);
            if !is_valid_content_type {
                return Err(Error::new(
                    format!("unexpected content type: {content_type:?}"),
                    ErrorKind::Malformed,
                ));
            }

            // Here we got a successful response.
            trace!("got a response with status {status}");
            let body = match resp.json::<proto::ChatCompletion>().await {
                Ok(body) => body,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Malformed,
                    ));
                }
            };
            Ok(proto::extract_completion(body))
        }
    }
}
