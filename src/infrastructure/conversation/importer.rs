//! Upload pipeline for previously exported conversations

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{validate_conversation_structure, ImportError};
use crate::infrastructure::security::ConversationEnvelope;

/// Parses, verifies and validates an uploaded package, in that order
#[derive(Debug, Clone)]
pub struct ConversationImporter {
    envelope: Arc<ConversationEnvelope>,
    max_messages: usize,
}

impl ConversationImporter {
    pub fn new(envelope: Arc<ConversationEnvelope>, max_messages: usize) -> Self {
        Self {
            envelope,
            max_messages,
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn envelope(&self) -> &ConversationEnvelope {
        &self.envelope
    }

    /// Return the verified transcript without committing it anywhere
    pub fn inspect(&self, bytes: &[u8]) -> Result<Vec<Value>, ImportError> {
        let package: Value = serde_json::from_slice(bytes).inspect_err(|e| {
            warn!(error = %e, "Conversation upload is not valid JSON");
        })?;

        if !self.envelope.verify_conversation(&package) {
            return Err(ImportError::Integrity);
        }

        let messages = package
            .get("messages")
            .cloned()
            .ok_or(ImportError::Integrity)?;

        validate_conversation_structure(&messages, self.max_messages).inspect_err(|e| {
            warn!(rule = e.rule(), error = %e, "Conversation upload failed validation");
        })?;

        let Value::Array(messages) = messages else {
            return Err(ImportError::Integrity);
        };

        info!(message_count = messages.len(), "Conversation upload verified");
        Ok(messages)
    }
}
