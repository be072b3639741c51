use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::chat::ChatMessage;

/// Conversation history collaborator.
///
/// The store is externally owned and append-only: targets read prior turns
/// and append new ones, never rewriting or deleting what is already there.
/// Implementations must tolerate concurrent appends.
#[async_trait]
pub trait Memory: Send + Sync {
    /// Returns all messages for a conversation, oldest first. Unknown
    /// conversation ids yield an empty list.
    async fn messages(&self, conversation_id: &str) -> Vec<ChatMessage>;

    /// Appends one message to a conversation, creating it if needed.
    async fn append(&self, conversation_id: &str, message: ChatMessage);
}

/// In-process [`Memory`] used as the default store and in tests.
#[derive(Default)]
pub struct InMemoryStore {
    conversations: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Memory for InMemoryStore {
    async fn messages(&self, conversation_id: &str) -> Vec<ChatMessage> {
        self.conversations
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn append(&self, conversation_id: &str, message: ChatMessage) {
        self.conversations
            .write()
            .await
            .entry(conversation_id.to_string())
            .or_default()
            .push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_conversation_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.messages("nope").await.is_empty());
    }

    #[tokio::test]
    async fn appends_preserve_order_per_conversation() {
        let store = InMemoryStore::new();
        store.append("c1", ChatMessage::user("first")).await;
        store.append("c1", ChatMessage::assistant("second")).await;
        store.append("c2", ChatMessage::user("other")).await;

        let c1 = store.messages("c1").await;
        assert_eq!(c1.len(), 2);
        assert_eq!(c1[0].content, "first");
        assert_eq!(c1[1].content, "second");
        assert_eq!(store.messages("c2").await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.append("c1", ChatMessage::user(format!("turn {i}"))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.messages("c1").await.len(), 16);
    }
}
