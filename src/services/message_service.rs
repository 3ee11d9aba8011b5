use crate::config::MessagingConfig;
use crate::domain::message::{Message, NewMessage, ReadReceipt};
use crate::error::{AppError, Result};
use crate::services::message_store::MessageStore;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) sent_total: Counter<u64>,
    pub(crate) marked_read_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("inbox-server");
        Self {
            sent_total: meter
                .u64_counter("inbox_messages_sent_total")
                .with_description("Total messages accepted by the store")
                .build(),
            marked_read_total: meter
                .u64_counter("inbox_messages_marked_read_total")
                .with_description("Total messages flipped from unread to read")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    config: MessagingConfig,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, config: MessagingConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Stores a new message, filling in the id and timestamp if absent.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the body exceeds the configured length.
    /// Returns `AppError::Internal` if the receipt time cannot be formatted.
    /// Returns `AppError::Store` if the message cannot be stored.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, new_message),
        fields(sender_id = %new_message.sender_id, receiver_id = %new_message.receiver_id)
    )]
    pub async fn send_message(&self, new_message: NewMessage) -> Result<Message> {
        let length = new_message.body.chars().count();
        if length > self.config.max_message_chars {
            return Err(AppError::BadRequest(format!(
                "Message is too long (max {} characters)",
                self.config.max_message_chars
            )));
        }

        let received_at = OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| {
            tracing::error!(error = %e, "Failed to format receipt time");
            AppError::Internal
        })?;

        let message = new_message.into_message(received_at);
        match self.store.append(message).await {
            Ok(stored) => {
                tracing::debug!(message_id = %stored.id, "Message stored");
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(stored)
            }
            Err(e) => {
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e.into())
            }
        }
    }

    /// Flags the receipt's messages as read for its user. Ids that do not exist
    /// or belong to another receiver are skipped silently.
    ///
    /// # Errors
    /// Returns `AppError::Store` if the update fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, receipt),
        fields(
            user_id = %receipt.user_id,
            conversation_id = %receipt.conversation_id,
            requested = receipt.message_ids.len()
        )
    )]
    pub async fn mark_read(&self, receipt: ReadReceipt) -> Result<usize> {
        let updated = self.store.mark_read(&receipt.user_id, &receipt.message_ids).await?;

        tracing::debug!(updated, "Messages marked read");
        self.metrics.marked_read_total.add(updated as u64, &[]);

        Ok(updated)
    }

    /// Looks up a single message by id.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no message has that id.
    #[tracing::instrument(err(level = "debug"), skip(self))]
    pub async fn get_message(&self, id: &str) -> Result<Message> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Lists every message the user sent or received, oldest first.
    ///
    /// # Errors
    /// Returns `AppError::Store` if the store cannot be read.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        Ok(self.store.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMessageStore;

    fn service(max_message_chars: usize) -> MessageService {
        crate::telemetry::init_test_telemetry();
        MessageService::new(Arc::new(InMemoryMessageStore::new()), MessagingConfig { max_message_chars })
    }

    fn new_message(id: &str, body: &str) -> NewMessage {
        NewMessage {
            id: Some(id.into()),
            sender_id: "u1".into(),
            receiver_id: "u2".into(),
            body: body.into(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_send_then_mark_read_round_trip() {
        let service = service(100);
        let stored = service.send_message(new_message("m1", "hi")).await.unwrap();
        assert_eq!(stored.id, "m1");
        assert!(!stored.read);

        let receipt =
            ReadReceipt { user_id: "u2".into(), conversation_id: "c1".into(), message_ids: vec!["m1".into()] };
        assert_eq!(service.mark_read(receipt.clone()).await.unwrap(), 1);
        assert!(service.get_message("m1").await.unwrap().read);

        assert_eq!(service.mark_read(receipt).await.unwrap(), 0);
        assert!(service.get_message("m1").await.unwrap().read);
    }

    #[tokio::test]
    async fn test_send_rejects_oversized_body_without_storing() {
        let service = service(4);
        let err = service.send_message(new_message("m1", "hello")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(matches!(service.get_message("m1").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_length_limit_counts_characters() {
        let service = service(2);
        assert!(service.send_message(new_message("m1", "héé")).await.is_err());
        assert!(service.send_message(new_message("m2", "éé")).await.is_ok());
    }

    #[tokio::test]
    async fn test_timestamp_is_kept_verbatim_or_defaulted() {
        let service = service(100);

        let stored = service
            .send_message(NewMessage { timestamp: Some("2024-05-01T12:30:00+0200".into()), ..new_message("m1", "hi") })
            .await
            .unwrap();
        assert_eq!(stored.timestamp, "2024-05-01T12:30:00+0200");

        let stored = service.send_message(new_message("m2", "hi")).await.unwrap();
        assert!(OffsetDateTime::parse(&stored.timestamp, &Rfc3339).is_ok(), "got {}", stored.timestamp);
    }

    #[tokio::test]
    async fn test_get_message_not_found() {
        let service = service(100);
        assert!(matches!(service.get_message("missing").await, Err(AppError::NotFound)));
    }
}
