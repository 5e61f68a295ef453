//! Conversation response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Conversation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub messages: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationResponse {
    pub fn from_domain(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            messages: conversation.messages().to_vec(),
            created_at: conversation.created_at(),
            updated_at: conversation.updated_at(),
        }
    }
}

/// Result of a stateless package check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message_count: usize,
}
