//! In-memory conversation repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    Conversation, ConversationId, ConversationRepository, ConversationUpdate, DomainError,
};

const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Process-local session store holding at most `max_sessions` conversations
#[derive(Debug)]
pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
    max_sessions: usize,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    #[cfg(test)]
    pub fn with_conversation(self, conversation: Conversation) -> Self {
        if let Ok(mut conversations) = self.conversations.write() {
            conversations.insert(conversation.id(), conversation);
        }
        self
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::internal("Conversation store lock poisoned")
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        let conversations = self.conversations.read().map_err(|_| poisoned())?;
        Ok(conversations.get(id).cloned())
    }

    async fn create(&self, conversation: Conversation) -> Result<Conversation, DomainError> {
        let mut conversations = self.conversations.write().map_err(|_| poisoned())?;

        if conversations.contains_key(&conversation.id()) {
            return Err(DomainError::internal(format!(
                "Conversation '{}' already exists",
                conversation.id()
            )));
        }

        if conversations.len() >= self.max_sessions {
            return Err(DomainError::limit_exceeded(format!(
                "Session limit of {} reached; delete a conversation first",
                self.max_sessions
            )));
        }

        conversations.insert(conversation.id(), conversation.clone());
        Ok(conversation)
    }

    async fn update(
        &self,
        id: &ConversationId,
        apply: ConversationUpdate,
    ) -> Result<Conversation, DomainError> {
        let mut conversations = self.conversations.write().map_err(|_| poisoned())?;
        let stored = conversations
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("Conversation '{}' not found", id)))?;

        let mut candidate = stored.clone();
        apply(&mut candidate)?;
        *stored = candidate.clone();

        Ok(candidate)
    }

    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError> {
        let mut conversations = self.conversations.write().map_err(|_| poisoned())?;
        Ok(conversations.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let conversations = self.conversations.read().map_err(|_| poisoned())?;
        Ok(conversations.len())
    }
}
