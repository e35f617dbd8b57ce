use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::pkg::internal::ai::spec::Turn;

/// The ordered turns of one conversation. Holders of the lock are the only
/// writers of that conversation.
pub type Conversation = Arc<Mutex<Vec<Turn>>>;

#[async_trait::async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the conversation for `id`, creating it with `greeting` as its
    /// first model turn when the id has not been seen before.
    async fn entry(&self, id: &str, greeting: &str) -> Conversation;

    async fn history(&self, id: &str) -> Option<Vec<Turn>>;

    async fn len(&self) -> usize;
}

/// Process-lifetime store: nothing is persisted and nothing expires.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn entry(&self, id: &str, greeting: &str) -> Conversation {
        if let Some(conversation) = self.conversations.read().await.get(id) {
            return conversation.clone();
        }
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::info!("starting conversation {}", id);
                Arc::new(Mutex::new(vec![Turn::model(greeting)]))
            })
            .clone()
    }

    async fn history(&self, id: &str) -> Option<Vec<Turn>> {
        let conversation = self.conversations.read().await.get(id)?.clone();
        let turns = conversation.lock().await.clone();
        Some(turns)
    }

    async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }
}
