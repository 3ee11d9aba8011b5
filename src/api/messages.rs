use crate::api::AppState;
use crate::api::middleware::AppJson;
use crate::api::schemas::messaging::{
    MarkReadRequest, MessageResponse, SendMessageRequest, SendMessageResponse, SuccessResponse,
};
use crate::domain::message::{NewMessage, ReadReceipt};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
};

/// Stores a chat message and echoes the stored record.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is malformed or `senderId`,
/// `receiverId` or `message` is missing.
pub async fn send_message(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>> {
    let new_message = NewMessage::try_from(payload).map_err(AppError::BadRequest)?;

    let stored = state.message_service.send_message(new_message).await?;

    Ok(Json(SendMessageResponse { success: true, message: stored.into() }))
}

/// Marks messages as read for the requesting recipient. The response does not
/// say how many messages changed.
///
/// # Errors
/// Returns `AppError::BadRequest` if `userId`, `conversationId` or `messageIds` is missing.
pub async fn mark_read(
    State(state): State<AppState>,
    AppJson(payload): AppJson<MarkReadRequest>,
) -> Result<Json<SuccessResponse>> {
    let receipt = ReadReceipt::try_from(payload).map_err(AppError::BadRequest)?;

    state.message_service.mark_read(receipt).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Fetches a single message by id.
///
/// # Errors
/// Returns `AppError::NotFound` if no message has that id.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let message = state.message_service.get_message(&message_id).await?;
    Ok(Json(message.into()))
}

/// Lists the messages a user sent or received, oldest first.
///
/// # Errors
/// Returns `AppError::Store` if the store cannot be read.
pub async fn list_user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>> {
    let messages = state.message_service.list_for_user(&user_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}
