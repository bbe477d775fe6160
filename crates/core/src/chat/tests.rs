use pocket_chat_model::{ChatMessage, ErrorKind};
use pocket_chat_test_model::{PresetReply, ScriptedProvider};

use super::{
    Chat, ChatBuilder, NO_RESPONSE_TEXT, SERVICE_FAILURE_TEXT, build_request,
};
use crate::conversation::Conversation;
use crate::store::{HISTORY_KEY, MemoryStore, Store};

const PROMPT: &str = "You are a friendly coding assistant.";

fn chat_over(
    store: &MemoryStore,
    replies: impl IntoIterator<Item = PresetReply>,
) -> Chat {
    let mut provider = ScriptedProvider::default();
    for reply in replies {
        provider.add_reply(reply);
    }
    ChatBuilder::with_completion_provider(provider)
        .with_system_prompt(PROMPT)
        .with_store(store.clone())
        .build()
}

fn stored_messages(store: &MemoryStore) -> Option<Vec<ChatMessage>> {
    let raw = store.get(HISTORY_KEY)?;
    Some(Conversation::from_json(&raw).unwrap().messages().to_vec())
}

#[tokio::test]
async fn test_submit_appends_one_turn_each_way() {
    let store = MemoryStore::default();
    let mut chat =
        chat_over(&store, [PresetReply::message("hi there")]);
    assert!(chat.history().is_empty());

    chat.submit("hello").await;

    let expected = vec![
        ChatMessage::user("hello"),
        ChatMessage::assistant("hi there"),
    ];
    assert_eq!(chat.history(), expected);
    assert_eq!(stored_messages(&store), Some(expected));
    assert!(!chat.is_busy());

    // The system prompt is synthesized per request, never recorded.
    assert!(
        !chat
            .history()
            .iter()
            .any(|msg| matches!(msg, ChatMessage::System { .. }))
    );
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let store = MemoryStore::default();
    let mut chat = chat_over(&store, []);

    chat.submit("").await;
    chat.submit("   ").await;

    assert!(chat.history().is_empty());
    assert!(!chat.is_busy());
    assert_eq!(store.get(HISTORY_KEY), None);
}

#[tokio::test]
async fn test_failed_call_appends_failure_notice() {
    let store = MemoryStore::default();
    let mut chat =
        chat_over(&store, [PresetReply::Failure(ErrorKind::Network)]);

    chat.submit("hello").await;

    let expected = vec![
        ChatMessage::user("hello"),
        ChatMessage::assistant(SERVICE_FAILURE_TEXT),
    ];
    assert_eq!(chat.history(), expected);
    // The failure notice is persisted like any other turn.
    assert_eq!(stored_messages(&store), Some(expected));
    assert!(!chat.is_busy());
}

#[tokio::test]
async fn test_empty_reply_appends_placeholder() {
    let store = MemoryStore::default();
    let mut chat = chat_over(&store, [PresetReply::Empty]);

    chat.submit("hello").await;

    assert_eq!(
        chat.history(),
        vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant(NO_RESPONSE_TEXT),
        ]
    );
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let store = MemoryStore::default();
    let mut chat = chat_over(&store, [PresetReply::message("hi there")]);

    chat.submit("hello").await;
    assert!(store.get(HISTORY_KEY).is_some());

    chat.clear();
    assert!(chat.history().is_empty());
    assert_eq!(store.get(HISTORY_KEY), None);

    chat.clear();
    assert!(chat.history().is_empty());
    assert_eq!(store.get(HISTORY_KEY), None);
}

#[tokio::test]
async fn test_restores_persisted_history() {
    let store = MemoryStore::default();
    let mut chat = chat_over(&store, [PresetReply::message("hi there")]);
    chat.submit("hello").await;
    let history = chat.history().to_vec();
    drop(chat);

    let restored = chat_over(&store, []);
    assert_eq!(restored.history(), history);
}

#[tokio::test]
async fn test_unparseable_history_starts_empty() {
    let store = MemoryStore::default();
    store.set(HISTORY_KEY, "definitely not json").unwrap();

    let chat = chat_over(&store, []);
    assert!(chat.history().is_empty());
}

#[tokio::test]
async fn test_submit_clears_pending_input() {
    let store = MemoryStore::default();
    let mut chat = chat_over(&store, [PresetReply::message("hi there")]);

    chat.set_pending_input("hello");
    assert_eq!(chat.pending_input(), "hello");

    chat.submit("hello").await;
    assert_eq!(chat.pending_input(), "");
}

#[test]
fn test_build_request_shape() {
    let history = vec![
        ChatMessage::user("hello"),
        ChatMessage::assistant("hi there"),
        ChatMessage::user("how are you?"),
    ];
    let req = build_request(PROMPT, &history);

    assert_eq!(req.messages.len(), history.len() + 1);
    assert_eq!(req.messages[0], ChatMessage::system(PROMPT));
    assert_eq!(&req.messages[1..], history);
}
