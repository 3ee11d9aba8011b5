use crate::domain::message::{Message, NewMessage, ReadReceipt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TryFrom<SendMessageRequest> for NewMessage {
    type Error = String;

    fn try_from(req: SendMessageRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            sender_id: required(req.sender_id, "senderId")?,
            receiver_id: required(req.receiver_id, "receiverId")?,
            body: required(req.message, "message")?,
            id: req.id.filter(|id| !id.is_empty()),
            timestamp: req.timestamp.filter(|t| !t.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub message_ids: Option<Vec<String>>,
}

impl TryFrom<MarkReadRequest> for ReadReceipt {
    type Error = String;

    fn try_from(req: MarkReadRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: required(req.user_id, "userId")?,
            conversation_id: required(req.conversation_id, "conversationId")?,
            message_ids: req.message_ids.ok_or_else(|| missing("messageIds"))?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub message: String,
    pub timestamp: String,
    pub read: bool,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            message: message.body,
            timestamp: message.timestamp,
            read: message.read,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: MessageResponse,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| missing(field))
}

fn missing(field: &str) -> String {
    format!("Missing required field: {field}")
}
