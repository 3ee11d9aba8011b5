use crate::domain::message::Message;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Storage capability behind the message handlers.
///
/// Records are kept in arrival order. Identifiers are not required to be unique;
/// lookups resolve to the first record that matches.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug {
    /// Appends a message and returns the stored record.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend rejects the write.
    async fn append(&self, message: Message) -> Result<Message, StoreError>;

    /// Returns the first message with the given id.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend cannot be read.
    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, StoreError>;

    /// Flags as read every listed message whose receiver is `recipient_id`.
    /// Unknown ids and messages addressed to someone else are skipped.
    /// Returns how many records changed from unread to read.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend rejects the update. Updates applied
    /// before the failure are not rolled back.
    async fn mark_read(&self, recipient_id: &str, message_ids: &[String]) -> Result<usize, StoreError>;

    /// Lists all messages sent or received by `user_id`, in arrival order.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend cannot be read.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Message>, StoreError>;

    /// Cheap liveness check used by the readiness probe.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
