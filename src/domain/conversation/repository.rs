//! Conversation repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Conversation, ConversationId};
use crate::domain::DomainError;

/// Mutation applied to a stored conversation by [`ConversationRepository::update`]
pub type ConversationUpdate =
    Box<dyn FnOnce(&mut Conversation) -> Result<(), DomainError> + Send>;

/// Box a closure as a [`ConversationUpdate`]
pub fn update_with<F>(apply: F) -> ConversationUpdate
where
    F: FnOnce(&mut Conversation) -> Result<(), DomainError> + Send + 'static,
{
    Box::new(apply)
}

/// Storage for active conversation transcripts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Get a conversation by ID
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// Store a new conversation
    async fn create(&self, conversation: Conversation) -> Result<Conversation, DomainError>;

    /// Apply `apply` to the stored conversation as one atomic step.
    ///
    /// Returns `NotFound` if the conversation does not exist. Nothing is
    /// written when `apply` fails.
    async fn update(
        &self,
        id: &ConversationId,
        apply: ConversationUpdate,
    ) -> Result<Conversation, DomainError>;

    /// Delete a conversation, returning whether it existed
    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError>;

    /// Number of stored conversations
    async fn count(&self) -> Result<usize, DomainError>;
}
