use crate::api::AppState;
use crate::api::middleware::AppJson;
use crate::api::schemas::conversations::DeleteConversationResponse;
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

/// Acknowledges a conversation deletion. Nothing is removed and no ownership
/// check is made; any well-formed JSON body succeeds, whatever its shape.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    AppJson(payload): AppJson<Value>,
) -> Json<DeleteConversationResponse> {
    let user_id = payload.get("userId").and_then(Value::as_str);
    state.conversation_service.delete_conversation(&conversation_id, user_id);

    Json(DeleteConversationResponse { success: true, message: "Conversation deleted successfully".to_string() })
}
