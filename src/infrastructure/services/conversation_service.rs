//! Conversation service - session transcripts, signed export and import

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::{
    update_with, validate_conversation_structure, Conversation, ConversationId,
    ConversationMessage, ConversationRepository, DomainError, ImportError,
    SecureConversationPackage,
};
use crate::infrastructure::conversation::ConversationImporter;

/// Conversation service over a session repository
pub struct ConversationService {
    repository: Arc<dyn ConversationRepository>,
    importer: ConversationImporter,
}

impl ConversationService {
    pub fn new(repository: Arc<dyn ConversationRepository>, importer: ConversationImporter) -> Self {
        Self {
            repository,
            importer,
        }
    }

    pub fn importer(&self) -> &ConversationImporter {
        &self.importer
    }

    /// Start an empty session
    pub async fn create(&self) -> Result<Conversation, DomainError> {
        let conversation = self
            .repository
            .create(Conversation::new(ConversationId::generate()))
            .await?;

        info!(conversation_id = %conversation.id(), "Created conversation");
        Ok(conversation)
    }

    /// Get a conversation, returning an error if not found
    pub async fn get(&self, id: &str) -> Result<Conversation, DomainError> {
        let conversation_id = ConversationId::parse(id)?;

        self.repository
            .get(&conversation_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Conversation '{}' not found", id)))
    }

    /// Append one turn, rejecting it if the transcript would break the schema
    pub async fn append_message(
        &self,
        id: &str,
        message: ConversationMessage,
    ) -> Result<Conversation, DomainError> {
        let conversation_id = ConversationId::parse(id)?;
        let max_messages = self.importer.max_messages();
        let message = message.to_value();

        let apply = update_with(move |conversation| {
            let mut messages = conversation.messages().to_vec();
            messages.push(message);

            let candidate = Value::Array(messages);
            validate_conversation_structure(&candidate, max_messages)
                .map_err(|e| DomainError::validation(e.to_string()))?;

            if let Value::Array(messages) = candidate {
                conversation.replace_messages(messages);
            }
            Ok(())
        });

        self.repository.update(&conversation_id, apply).await
    }

    /// Drop all turns but keep the session
    pub async fn clear(&self, id: &str) -> Result<Conversation, DomainError> {
        let conversation_id = ConversationId::parse(id)?;

        self.repository
            .update(
                &conversation_id,
                update_with(|conversation| {
                    conversation.clear();
                    Ok(())
                }),
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let conversation_id = ConversationId::parse(id)?;

        if !self.repository.delete(&conversation_id).await? {
            return Err(DomainError::not_found(format!(
                "Conversation '{}' not found",
                id
            )));
        }

        info!(conversation_id = %conversation_id, "Deleted conversation");
        Ok(())
    }

    /// Signed package of the active transcript
    pub async fn export(&self, id: &str) -> Result<SecureConversationPackage, DomainError> {
        let conversation = self.get(id).await?;
        let package = self
            .importer
            .envelope()
            .secure_conversation(conversation.messages());

        info!(
            conversation_id = %conversation.id(),
            message_count = package.message_count(),
            "Exported conversation"
        );
        Ok(package)
    }

    /// Replace the active transcript with an uploaded package.
    ///
    /// The session is only written after parsing, verification and
    /// validation have all passed, and never recreated if it was deleted
    /// in the meantime.
    pub async fn import(&self, id: &str, bytes: &[u8]) -> Result<Conversation, ImportError> {
        let conversation_id = self.get(id).await?.id();
        let messages = self.importer.inspect(bytes)?;

        let conversation = self
            .repository
            .update(
                &conversation_id,
                update_with(move |conversation| {
                    conversation.replace_messages(messages);
                    Ok(())
                }),
            )
            .await?;

        info!(
            conversation_id = %conversation.id(),
            message_count = conversation.len(),
            "Imported conversation"
        );
        Ok(conversation)
    }

    /// Verify and validate a package without touching any session
    pub fn inspect(&self, bytes: &[u8]) -> Result<Vec<Value>, ImportError> {
        self.importer.inspect(bytes)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockConversationRepository, StructuralError};
    use crate::infrastructure::conversation::InMemoryConversationRepository;
    use crate::infrastructure::security::{ConversationEnvelope, HashAlgorithm};
    use serde_json::json;

    fn importer(max_messages: usize) -> ConversationImporter {
        let envelope = ConversationEnvelope::new("secret", "salt", HashAlgorithm::Sha256).unwrap();
        ConversationImporter::new(Arc::new(envelope), max_messages)
    }

    fn service(max_messages: usize) -> ConversationService {
        ConversationService::new(
            Arc::new(InMemoryConversationRepository::new()),
            importer(max_messages),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service(10);
        let created = service.create().await.unwrap();

        let loaded = service.get(&created.id().to_string()).await.unwrap();
        assert!(loaded.is_empty());
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_and_invalid_ids() {
        let service = service(10);

        let missing = service.get(&ConversationId::generate().to_string()).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));

        let invalid = service.get("not-a-uuid").await;
        assert!(matches!(invalid, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_append_respects_limit() {
        let service = service(2);
        let id = service.create().await.unwrap().id().to_string();

        service
            .append_message(&id, ConversationMessage::user("hi"))
            .await
            .unwrap();
        service
            .append_message(&id, ConversationMessage::assistant("hello"))
            .await
            .unwrap();

        let result = service
            .append_message(&id, ConversationMessage::user("one more"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(service.get(&id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_export_then_import_into_another_session() {
        let service = service(10);
        let source = service.create().await.unwrap().id().to_string();
        service
            .append_message(&source, ConversationMessage::user("Summarize this"))
            .await
            .unwrap();

        let package = service.export(&source).await.unwrap();
        let bytes = serde_json::to_vec(&package).unwrap();

        let target = service.create().await.unwrap().id().to_string();
        let imported = service.import(&target, &bytes).await.unwrap();

        assert_eq!(imported.messages(), package.messages.as_slice());
    }

    #[tokio::test]
    async fn test_failed_import_keeps_active_transcript() {
        let service = service(10);
        let id = service.create().await.unwrap().id().to_string();
        service
            .append_message(&id, ConversationMessage::user("keep me"))
            .await
            .unwrap();

        let package = service.export(&id).await.unwrap();
        let mut tampered = serde_json::to_value(&package).unwrap();
        tampered["messages"][0]["content"][0]["text"] = json!("replace me");
        let bytes = serde_json::to_vec(&tampered).unwrap();

        let result = service.import(&id, &bytes).await;
        assert!(matches!(result, Err(ImportError::Integrity)));

        let result = service.import(&id, b"not json").await;
        assert!(matches!(result, Err(ImportError::Parse(_))));

        let conversation = service.get(&id).await.unwrap();
        assert_eq!(conversation.messages(), package.messages.as_slice());
    }

    #[tokio::test]
    async fn test_rejected_import_never_writes() {
        let id = ConversationId::generate();
        let mut repository = MockConversationRepository::new();
        repository
            .expect_get()
            .returning(|id| Ok(Some(Conversation::new(*id))));
        repository.expect_update().never();

        let importer = importer(10);
        let forged = importer
            .envelope()
            .secure_conversation(&[json!({"role": "robot", "content": [{"text": "hi"}]})]);
        let bytes = serde_json::to_vec(&forged).unwrap();

        let service = ConversationService::new(Arc::new(repository), importer);
        let result = service.import(&id.to_string(), &bytes).await;

        assert!(matches!(
            result,
            Err(ImportError::Structure(StructuralError::InvalidRole { .. }))
        ));
    }

    #[tokio::test]
    async fn test_import_into_missing_session() {
        let mut repository = MockConversationRepository::new();
        repository.expect_get().returning(|_| Ok(None));

        let service = ConversationService::new(Arc::new(repository), importer(10));
        let result = service
            .import(&ConversationId::generate().to_string(), b"{}")
            .await;

        assert!(matches!(
            result,
            Err(ImportError::Domain(DomainError::NotFound { .. }))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_appends_are_all_kept() {
        let service = Arc::new(service(1000));
        let id = service.create().await.unwrap().id().to_string();

        let handles: Vec<_> = (0..400)
            .map(|i| {
                let service = Arc::clone(&service);
                let id = id.clone();
                tokio::spawn(async move {
                    service
                        .append_message(&id, ConversationMessage::user(format!("m{}", i)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.get(&id).await.unwrap().len(), 400);
    }

    #[tokio::test]
    async fn test_append_after_delete_does_not_recreate() {
        let service = service(10);
        let id = service.create().await.unwrap().id().to_string();
        service.delete(&id).await.unwrap();

        let result = service
            .append_message(&id, ConversationMessage::user("late"))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_fails_when_store_is_full() {
        let service = ConversationService::new(
            Arc::new(InMemoryConversationRepository::new().with_max_sessions(1)),
            importer(10),
        );
        service.create().await.unwrap();

        assert!(matches!(
            service.create().await,
            Err(DomainError::LimitExceeded { .. })
        ));
    }

    #[tokio::test]
    async fn test_clear_and_delete() {
        let service = service(10);
        let id = service.create().await.unwrap().id().to_string();
        service
            .append_message(&id, ConversationMessage::user("hi"))
            .await
            .unwrap();

        assert!(service.clear(&id).await.unwrap().is_empty());

        service.delete(&id).await.unwrap();
        assert!(matches!(
            service.delete(&id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
