//! Conversation endpoint handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ConversationResponse, VerifyResponse};
use crate::domain::{ConversationMessage, SecureConversationPackage};

/// POST /v1/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ConversationResponse>), ApiError> {
    let conversation = state.conversation_service.create().await?;
    Ok((
        StatusCode::CREATED,
        Json(ConversationResponse::from_domain(&conversation)),
    ))
}

/// GET /v1/conversations/{conversation_id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let conversation = state.conversation_service.get(&conversation_id).await?;
    Ok(Json(ConversationResponse::from_domain(&conversation)))
}

/// DELETE /v1/conversations/{conversation_id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.conversation_service.delete(&conversation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/conversations/{conversation_id}/messages
pub async fn append_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(message): Json<ConversationMessage>,
) -> Result<Json<ConversationResponse>, ApiError> {
    debug!(conversation_id = %conversation_id, role = message.role.as_str(), "Appending message");

    let conversation = state
        .conversation_service
        .append_message(&conversation_id, message)
        .await?;
    Ok(Json(ConversationResponse::from_domain(&conversation)))
}

/// DELETE /v1/conversations/{conversation_id}/messages
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let conversation = state.conversation_service.clear(&conversation_id).await?;
    Ok(Json(ConversationResponse::from_domain(&conversation)))
}

/// GET /v1/conversations/{conversation_id}/export
pub async fn export_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<SecureConversationPackage>, ApiError> {
    let package = state.conversation_service.export(&conversation_id).await?;
    Ok(Json(package))
}

/// POST /v1/conversations/{conversation_id}/import
///
/// Takes the raw uploaded file as the request body.
pub async fn import_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    body: Bytes,
) -> Result<Json<ConversationResponse>, ApiError> {
    debug!(conversation_id = %conversation_id, bytes = body.len(), "Importing conversation");

    let conversation = state
        .conversation_service
        .import(&conversation_id, &body)
        .await?;
    Ok(Json(ConversationResponse::from_domain(&conversation)))
}

/// POST /v1/conversations/verify
pub async fn verify_conversation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, ApiError> {
    let messages = state.conversation_service.inspect(&body)?;
    Ok(Json(VerifyResponse {
        valid: true,
        message_count: messages.len(),
    }))
}
