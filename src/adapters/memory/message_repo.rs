use crate::domain::message::Message;
use crate::services::message_store::{MessageStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-lifetime message store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: Message) -> Result<Message, StoreError> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, StoreError> {
        Ok(self.messages.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn mark_read(&self, recipient_id: &str, message_ids: &[String]) -> Result<usize, StoreError> {
        let mut messages = self.messages.write().await;
        let mut updated = 0;

        // Linear scan per id; there is no index.
        for id in message_ids {
            let target = messages.iter_mut().find(|m| m.id == *id && m.is_addressed_to(recipient_id));
            if target.is_some_and(Message::mark_read) {
                updated += 1;
            }
        }

        Ok(updated)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Message>, StoreError> {
        Ok(self.messages.read().await.iter().filter(|m| m.involves(user_id)).cloned().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
