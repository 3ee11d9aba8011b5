use uuid::Uuid;

/// A stored chat message. Only `read` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub body: String,
    /// ISO-8601 text exactly as submitted, or the RFC 3339 receipt time.
    pub timestamp: String,
    pub read: bool,
}

impl Message {
    #[must_use]
    pub fn is_addressed_to(&self, user_id: &str) -> bool {
        self.receiver_id == user_id
    }

    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// Sets the read flag. Returns `true` only if the flag actually changed.
    pub const fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub id: Option<String>,
    pub sender_id: String,
    pub receiver_id: String,
    pub body: String,
    pub timestamp: Option<String>,
}

impl NewMessage {
    /// Fills in the server-side defaults: a random id when the client sent none,
    /// and the receipt time when no timestamp was given. New messages are always unread.
    #[must_use]
    pub fn into_message(self, received_at: String) -> Message {
        Message {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            body: self.body,
            timestamp: self.timestamp.unwrap_or(received_at),
            read: false,
        }
    }
}

/// A request from `user_id` to flag `message_ids` as read.
#[derive(Debug, Clone)]
pub struct ReadReceipt {
    pub user_id: String,
    // Not used for matching; see DESIGN.md.
    pub conversation_id: String,
    pub message_ids: Vec<String>,
}
