//! Core logic including the conversation controller, history
//! persistence and the completion client.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat;
mod client;
pub mod conversation;
pub mod store;

pub use chat::{
    Chat, ChatBuilder, NO_RESPONSE_TEXT, SERVICE_FAILURE_TEXT, build_request,
};
